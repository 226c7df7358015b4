//! Command runner trait definition.
//!
//! This port defines how tool handlers ask for a Q CLI call. The
//! implementation owns every process detail: executable lookup, stdio
//! wiring, environment, and the timeout.

use async_trait::async_trait;

use crate::domain::{CommandResult, QInvocation};

/// Runs Q CLI invocations.
///
/// # Design Rules
///
/// - Infallible by signature: timeouts and launch failures come back as a
///   `CommandResult` with `success == false` and `exit_code == -1`
/// - One child process per call, no shared state between calls
/// - Must support: real subprocess runner, mock runner in tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the invocation and report its normalized outcome.
    async fn run(&self, invocation: QInvocation) -> CommandResult;
}
