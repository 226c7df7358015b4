//! Command builder for Q CLI.
//!
//! The child never sees a terminal: stdin is null, stdout and stderr are
//! piped for capture, and the process is killed if its handle is dropped
//! (which is how a timed-out wait terminates it).

use qmcp_core::ExecutorConfig;
use std::process::Stdio;
use tokio::process::Command;

/// Build the Q CLI command for already-canonical arguments.
///
/// The inherited environment is kept; `config.extra_env` is layered on top.
pub fn build_command(config: &ExecutorConfig, args: &[String]) -> Command {
    let mut cmd = Command::new(&config.executable);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for (key, value) in &config.extra_env {
        cmd.env(key, value);
    }

    cmd
}
