//! Process runtime for q-cli-mcp.
//!
//! Implements the [`qmcp_core::CommandRunner`] port by launching Q CLI as a
//! child process with tokio, bounded by the configured timeout.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Integration tests use tempfile; silence the lint for the unit test build
#[cfg(test)]
use tempfile as _;

pub mod command;
pub mod runner;

pub use command::build_command;
pub use runner::QCommandRunner;
