//! Core domain types and port definitions for q-cli-mcp.
//!
//! This crate knows what a Q CLI invocation looks like and what its result
//! carries, but nothing about how a process is spawned or how results travel
//! over the wire. Adapters (`qmcp-runtime`, `qmcp-mcp`, `qmcp-cli`) depend on
//! it; it depends on none of them.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT_SECS, ExecutorConfig, UNBUFFERED_ENV_KEY,
};
pub use domain::{
    ABNORMAL_EXIT_CODE, CHAT_FLAGS, CHAT_SUBCOMMAND, CommandResult, NO_INTERACTIVE_FLAG,
    QInvocation, TRUST_ALL_TOOLS_FLAG, augment_args, describe_timeout, render_command_line,
};
pub use ports::{CommandRunner, ExecutionError};
