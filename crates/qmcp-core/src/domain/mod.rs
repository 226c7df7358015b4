//! Domain types for Q CLI invocations and their results.

mod invocation;
mod result;

pub use invocation::{
    CHAT_FLAGS, CHAT_SUBCOMMAND, NO_INTERACTIVE_FLAG, QInvocation, TRUST_ALL_TOOLS_FLAG,
    augment_args, render_command_line,
};
pub use result::{ABNORMAL_EXIT_CODE, CommandResult, describe_timeout};
