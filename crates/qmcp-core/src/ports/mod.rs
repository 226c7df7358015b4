//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod command_runner;

use std::time::Duration;
use thiserror::Error;

use crate::domain::describe_timeout;

pub use command_runner::CommandRunner;

/// Ways a Q CLI call can fail before producing an exit code.
///
/// A non-zero exit is not an error here: the child ran, and its status is
/// reported through [`crate::CommandResult::success`]. Runners convert
/// these variants into a `CommandResult` before returning to callers.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The child did not finish within the configured bound.
    #[error("Command timed out after {}", describe_timeout(.0))]
    TimedOut(Duration),

    /// Spawning or waiting on the child failed.
    #[error("{0}")]
    Launch(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_uses_configured_value() {
        let err = ExecutionError::TimedOut(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Command timed out after 10 seconds");
    }

    #[test]
    fn test_launch_message_is_os_error_text() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let expected = io.to_string();
        let err = ExecutionError::from(io);
        assert_eq!(err.to_string(), expected);
    }
}
