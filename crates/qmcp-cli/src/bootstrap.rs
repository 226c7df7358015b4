//! CLI bootstrap - the composition root.
//!
//! The only place where the process runner and the MCP server context are
//! wired together. Handlers receive the finished [`CliContext`].

use std::sync::Arc;
use std::time::Duration;

use qmcp_core::{CommandRunner, ExecutorConfig};
use qmcp_mcp::ServerContext;
use qmcp_runtime::QCommandRunner;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Q CLI executable name or path.
    pub executable: String,
    /// Wall-clock limit per Q CLI call.
    pub timeout: Duration,
}

impl CliConfig {
    /// Create config with default executable and timeout.
    pub fn with_defaults() -> Self {
        let defaults = ExecutorConfig::with_defaults();
        Self {
            executable: defaults.executable,
            timeout: defaults.timeout,
        }
    }

    /// Take values from parsed flags and environment.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            executable: cli.q_binary.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }

    /// Validated executor configuration.
    pub fn executor_config(&self) -> Result<ExecutorConfig, CliError> {
        let config = ExecutorConfig::with_defaults()
            .with_executable(self.executable.clone())
            .with_timeout(self.timeout);
        config.validate()?;
        Ok(config)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Shared dependencies for the MCP tool handlers.
    pub server: ServerContext,
}

impl CliContext {
    /// Access the server context.
    pub const fn server(&self) -> &ServerContext {
        &self.server
    }
}

/// Bootstrap the CLI application with the real process runner.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let executor = config.executor_config()?;
    debug!(
        executable = %executor.executable,
        timeout_secs = executor.timeout.as_secs(),
        "Configured Q CLI runner"
    );

    Ok(bootstrap_with(Arc::new(QCommandRunner::new(executor))))
}

/// Bootstrap around an existing runner.
pub fn bootstrap_with(runner: Arc<dyn CommandRunner>) -> CliContext {
    CliContext {
        server: ServerContext::new(runner),
    }
}
