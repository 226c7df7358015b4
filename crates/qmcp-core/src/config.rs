//! Executor configuration and validation.
//!
//! Pure configuration types with no infrastructure dependencies. The CLI
//! builds an `ExecutorConfig` from flags and environment, validates it, and
//! hands it to the runtime.

use std::time::Duration;

/// Executable name resolved through `PATH` by default.
pub const DEFAULT_EXECUTABLE: &str = "q";

/// Wall-clock bound for a single Q CLI call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable that disables output buffering in the child.
pub const UNBUFFERED_ENV_KEY: &str = "PYTHONUNBUFFERED";

/// How the runtime launches Q CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Executable name or path.
    pub executable: String,

    /// Maximum time to wait for the child to exit.
    pub timeout: Duration,

    /// Variables added on top of the inherited environment.
    pub extra_env: Vec<(String, String)>,
}

impl ExecutorConfig {
    /// Create config with default executable, timeout and environment.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            extra_env: vec![(UNBUFFERED_ENV_KEY.to_string(), "1".to_string())],
        }
    }

    /// Set the executable name or path.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Set the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an environment variable for the child.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_env.push((key.into(), value.into()));
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.executable.trim().is_empty() {
            return Err(ConfigError::EmptyExecutable);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Q CLI executable must not be empty")]
    EmptyExecutable,

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
}
