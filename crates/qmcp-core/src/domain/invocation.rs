//! Q CLI argument lists.
//!
//! A `QInvocation` is the argument list a tool handler wants to run, without
//! the executable name. The chat subcommand must never wait on a terminal, so
//! its canonical form always ends with the non-interactive flags.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Subcommand that starts a Q chat session.
pub const CHAT_SUBCOMMAND: &str = "chat";

/// Disables the interactive chat prompt.
pub const NO_INTERACTIVE_FLAG: &str = "--no-interactive";

/// Trusts every tool so Q never asks for confirmation.
pub const TRUST_ALL_TOOLS_FLAG: &str = "--trust-all-tools";

/// Flags appended to every chat invocation, in order.
pub const CHAT_FLAGS: [&str; 2] = [NO_INTERACTIVE_FLAG, TRUST_ALL_TOOLS_FLAG];

/// An ordered list of arguments for a single Q CLI call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QInvocation {
    args: Vec<String>,
}

impl QInvocation {
    /// Create an invocation from raw arguments.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `q chat <prompt>`
    pub fn chat(prompt: impl Into<String>) -> Self {
        Self {
            args: vec![CHAT_SUBCOMMAND.to_string(), prompt.into()],
        }
    }

    /// `q whoami`
    pub fn whoami() -> Self {
        Self::new(["whoami"])
    }

    /// `q diagnostic`
    pub fn diagnostic() -> Self {
        Self::new(["diagnostic"])
    }

    /// Arguments as supplied by the caller.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether this invocation runs the chat subcommand.
    pub fn is_chat(&self) -> bool {
        self.args.iter().any(|arg| arg == CHAT_SUBCOMMAND)
    }

    /// Arguments actually passed to the executable.
    pub fn canonical_args(&self) -> Vec<String> {
        augment_args(&self.args)
    }
}

/// Return the canonical argument list for a Q CLI call.
///
/// Lists that contain the chat subcommand get [`CHAT_FLAGS`] appended at the
/// end. Any copies of those flags the caller already supplied are removed
/// first, so each flag appears exactly once. Every other list is returned
/// unchanged.
pub fn augment_args(args: &[String]) -> Vec<String> {
    if !args.iter().any(|arg| arg == CHAT_SUBCOMMAND) {
        return args.to_vec();
    }

    let mut canonical: Vec<String> = args
        .iter()
        .filter(|arg| !CHAT_FLAGS.contains(&arg.as_str()))
        .cloned()
        .collect();

    let stripped = args.len() - canonical.len();
    if stripped > 0 {
        debug!(stripped, "Moved caller-supplied chat flags to the end");
    }

    canonical.extend(CHAT_FLAGS.iter().map(|flag| (*flag).to_string()));
    canonical
}

/// Render the full command line as display text, e.g. `q whoami`.
pub fn render_command_line(executable: &str, args: &[String]) -> String {
    std::iter::once(executable)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
