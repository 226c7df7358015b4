//! Subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Print the tool definitions the server advertises
    Tools,

    /// Run one tool once and print its text result
    Call {
        /// Tool name (q_chat, q_whoami, q_diagnostic)
        tool: String,
        /// Prompt for q_chat
        #[arg(short, long)]
        prompt: Option<String>,
    },
}
