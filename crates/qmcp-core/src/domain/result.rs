//! Normalized outcome of a single Q CLI call.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::ExecutionError;

/// Exit code reported when the child never produced one
/// (timeout, launch failure, or termination by signal).
pub const ABNORMAL_EXIT_CODE: i32 = -1;

/// Result of running one Q CLI command.
///
/// Built exactly once per invocation and never mutated afterwards; fields
/// are read through accessors. The serialized keys match the shape the
/// handlers log (`returncode`, `command`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    success: bool,
    stdout: String,
    stderr: String,
    #[serde(rename = "returncode")]
    exit_code: i32,
    #[serde(rename = "command")]
    command_line: String,
}

impl CommandResult {
    /// The child ran to completion. Success means exit code 0.
    pub fn completed(
        command_line: impl Into<String>,
        exit_code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            success: exit_code == 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            command_line: command_line.into(),
        }
    }

    /// The child exceeded its time budget. Partial output is discarded.
    pub fn timed_out(command_line: impl Into<String>, timeout: Duration) -> Self {
        Self::failed(command_line, ExecutionError::TimedOut(timeout).to_string())
    }

    /// The child could not be launched or waited on.
    pub fn failed(command_line: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message.into(),
            exit_code: ABNORMAL_EXIT_CODE,
            command_line: command_line.into(),
        }
    }

    pub const fn success(&self) -> bool {
        self.success
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// The executed command line as text.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }
}

/// Human-readable timeout, e.g. `10 seconds` or `250ms`.
pub fn describe_timeout(timeout: &Duration) -> String {
    if timeout.subsec_nanos() != 0 {
        return format!("{}ms", timeout.as_millis());
    }
    match timeout.as_secs() {
        1 => "1 second".to_string(),
        secs => format!("{secs} seconds"),
    }
}
