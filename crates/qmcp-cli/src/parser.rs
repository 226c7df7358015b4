//! Main CLI parser and top-level argument handling.
//!
//! Global options configure how Q CLI is launched and how much is logged;
//! every option can also come from the environment.

use clap::Parser;
use qmcp_core::{DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT_SECS};

use crate::commands::Commands;

/// Model Context Protocol server exposing Amazon Q Developer CLI as tools.
///
/// With no subcommand the server speaks MCP on stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "q-cli-mcp")]
#[command(about = "Expose Amazon Q Developer CLI as MCP tools over stdio")]
#[command(version)]
pub struct Cli {
    /// Q CLI executable name or path
    #[arg(
        long = "q-binary",
        env = "Q_CLI_MCP_BINARY",
        default_value = DEFAULT_EXECUTABLE,
        global = true
    )]
    pub q_binary: String,

    /// Seconds to wait for a single Q CLI call
    #[arg(
        long = "timeout-secs",
        env = "Q_CLI_MCP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    pub timeout_secs: u64,

    /// Log filter directive (e.g. "debug" or "qmcp_runtime=trace")
    #[arg(long = "log-level", env = "Q_CLI_MCP_LOG", global = true)]
    pub log_level: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
