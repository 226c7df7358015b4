//! Drives the built `q-cli-mcp` binary over real pipes.

#![cfg(unix)]

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};

fn q_cli_mcp() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_q-cli-mcp"));
    cmd.env_remove("Q_CLI_MCP_BINARY")
        .env_remove("Q_CLI_MCP_TIMEOUT_SECS")
        .env_remove("Q_CLI_MCP_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_serve_answers_on_stdout_and_logs_on_stderr() {
    let mut child = q_cli_mcp()
        .args(["--q-binary", "echo"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let requests = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "q_whoami"}}),
    ];
    {
        let mut stdin = child.stdin.take().unwrap();
        for request in &requests {
            writeln!(stdin, "{request}").unwrap();
        }
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let responses: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(
        responses[1]["result"]["content"][0]["text"],
        "User information:\nwhoami\n"
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("q_whoami called"));
}

#[test]
fn test_tools_subcommand_prints_definitions() {
    let output = q_cli_mcp().arg("tools").output().unwrap();
    assert!(output.status.success());

    let tools: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tools.as_array().unwrap().len(), 3);
    assert_eq!(tools[0]["name"], "q_chat");
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["prompt"]));
}

#[test]
fn test_call_subcommand_runs_chat() {
    let output = q_cli_mcp()
        .args(["--q-binary", "echo", "call", "q_chat", "--prompt", "hi"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Output:\nchat hi --no-interactive --trust-all-tools\n\n"
    );
}

#[test]
fn test_zero_timeout_exits_with_config_error() {
    let output = q_cli_mcp()
        .args(["--timeout-secs", "0", "tools"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(78));
    assert!(output.stdout.is_empty());
}
