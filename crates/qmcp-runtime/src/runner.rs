//! Q CLI runner - the command executor.
//!
//! Every call spawns its own child, waits at most `config.timeout`, and
//! returns a `CommandResult`. Nothing propagates as an error: timeouts and
//! launch failures are folded into the result with exit code -1.

use async_trait::async_trait;
use qmcp_core::{
    ABNORMAL_EXIT_CODE, CommandResult, CommandRunner, ExecutionError, ExecutorConfig, QInvocation,
    render_command_line,
};
use std::process::Output;
use tokio::time::timeout;
use tracing::{error, info};

use crate::command::build_command;

/// Runs Q CLI invocations as child processes.
#[derive(Debug, Clone)]
pub struct QCommandRunner {
    config: ExecutorConfig,
}

impl QCommandRunner {
    /// Create a runner for an already-validated configuration.
    pub const fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run one invocation to completion, timeout, or failure.
    pub async fn execute(&self, invocation: &QInvocation) -> CommandResult {
        let args = invocation.canonical_args();
        let command_line = render_command_line(&self.config.executable, &args);

        info!("Executing command: {}", command_line);
        info!("Starting subprocess...");

        match self.spawn_and_wait(&args).await {
            Ok(output) => {
                let exit_code = output.status.code().unwrap_or(ABNORMAL_EXIT_CODE);
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

                info!("Subprocess completed with return code: {}", exit_code);
                info!("Stdout: {}", stdout);
                info!("Stderr: {}", stderr);

                CommandResult::completed(command_line, exit_code, stdout, stderr)
            }
            Err(ExecutionError::TimedOut(limit)) => {
                error!(command = %command_line, "Command timed out");
                CommandResult::timed_out(command_line, limit)
            }
            Err(err) => {
                error!(command = %command_line, "Error executing command: {}", err);
                CommandResult::failed(command_line, err.to_string())
            }
        }
    }

    /// Spawn the child and collect its output within the timeout.
    ///
    /// On timeout the `wait_with_output` future is dropped, which drops the
    /// child and kills it (`kill_on_drop`).
    async fn spawn_and_wait(&self, args: &[String]) -> Result<Output, ExecutionError> {
        let child = build_command(&self.config, args).spawn()?;

        match timeout(self.config.timeout, child.wait_with_output()).await {
            Ok(output) => Ok(output?),
            Err(_) => Err(ExecutionError::TimedOut(self.config.timeout)),
        }
    }
}

#[async_trait]
impl CommandRunner for QCommandRunner {
    async fn run(&self, invocation: QInvocation) -> CommandResult {
        self.execute(&invocation).await
    }
}
