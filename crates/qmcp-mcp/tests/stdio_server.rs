//! End-to-end tests: JSON-RPC lines in, JSON-RPC lines out, with a real
//! process runner behind the tools.
//!
//! `echo` stands in for `q`, so every tool answers with its own argv.

#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use qmcp_core::{CommandResult, CommandRunner, ExecutorConfig, QInvocation};
use qmcp_mcp::{JsonRpcResponse, McpServer, ServerContext};
use qmcp_runtime::QCommandRunner;
use serde_json::{Value, json};

fn echo_server() -> McpServer {
    let config = ExecutorConfig::default()
        .with_executable("echo")
        .with_timeout(Duration::from_secs(5));
    let ctx = ServerContext::new(Arc::new(QCommandRunner::new(config)));
    McpServer::from_context(&ctx)
}

async fn exchange(server: &McpServer, requests: &[Value]) -> Vec<JsonRpcResponse> {
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

#[tokio::test]
async fn test_full_session() {
    let server = echo_server();
    let responses = exchange(
        &server,
        &[
            json!({
                "jsonrpc": "2.0",
                "id": 0,
                "method": "initialize",
                "params": {"protocolVersion": "2025-03-26", "capabilities": {}}
            }),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
            call(2, "q_whoami", json!({})),
            call(3, "q_diagnostic", json!({})),
            call(4, "q_chat", json!({"prompt": "hello"})),
        ],
    )
    .await;

    assert_eq!(responses.len(), 5);
    let ids: Vec<_> = responses.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![json!(0), json!(1), json!(2), json!(3), json!(4)]);

    let init = responses[0].result.as_ref().unwrap();
    assert_eq!(init["protocolVersion"], "2025-03-26");

    let tools = responses[1].result.as_ref().unwrap()["tools"]
        .as_array()
        .unwrap();
    assert_eq!(tools.len(), 3);

    let whoami = responses[2].result.as_ref().unwrap();
    assert_eq!(whoami["content"][0]["text"], "User information:\nwhoami\n");
    assert_eq!(
        whoami["structuredContent"]["result"],
        "User information:\nwhoami\n"
    );

    let diagnostic = responses[3].result.as_ref().unwrap();
    assert_eq!(
        diagnostic["content"][0]["text"],
        "Diagnostic results:\ndiagnostic\n"
    );

    let chat = responses[4].result.as_ref().unwrap();
    let expected = "Output:\nchat hello --no-interactive --trust-all-tools\n";
    assert_eq!(chat["content"][0]["text"], expected);
    assert_eq!(
        chat["structuredContent"],
        json!({"content": [{"type": "text", "text": expected}]})
    );
    assert_eq!(chat["isError"], false);
}

#[tokio::test]
async fn test_chat_flags_are_not_duplicated() {
    let server = echo_server();
    let responses = exchange(
        &server,
        &[call(
            1,
            "q_chat",
            json!({"prompt": "hi --trust-all-tools"}),
        )],
    )
    .await;

    let text = responses[0].result.as_ref().unwrap()["content"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(text.matches("--trust-all-tools").count(), 2);
    assert!(text.ends_with("--no-interactive --trust-all-tools\n"));
}

/// Runs `sh -c "sleep 5" <args...>` so every call outlives its timeout.
struct SleepingRunner {
    inner: QCommandRunner,
}

#[async_trait]
impl CommandRunner for SleepingRunner {
    async fn run(&self, invocation: QInvocation) -> CommandResult {
        let mut args = vec!["-c".to_string(), "sleep 5".to_string()];
        args.extend(invocation.args().iter().cloned());
        self.inner.run(QInvocation::new(args)).await
    }
}

#[tokio::test]
async fn test_timeout_is_reported_in_chat_errors() {
    let config = ExecutorConfig::default()
        .with_executable("sh")
        .with_timeout(Duration::from_millis(200));
    let runner = SleepingRunner {
        inner: QCommandRunner::new(config),
    };
    let server = McpServer::from_context(&ServerContext::new(Arc::new(runner)));

    let responses = exchange(
        &server,
        &[
            call(1, "q_chat", json!({"prompt": "hello"})),
            call(2, "q_whoami", json!({})),
        ],
    )
    .await;

    let chat = responses[0].result.as_ref().unwrap();
    assert_eq!(chat["isError"], false);
    assert_eq!(
        chat["content"][0]["text"],
        "Output:\n\n\nErrors:\nCommand timed out after 200ms"
    );

    // Labeled tools drop stderr, so only the label survives a timeout
    let whoami = responses[1].result.as_ref().unwrap();
    assert_eq!(whoami["content"][0]["text"], "User information:\n");
}

#[tokio::test]
async fn test_unknown_tool_and_bad_arguments_are_tool_errors() {
    let server = echo_server();
    let responses = exchange(
        &server,
        &[
            call(1, "q_translate", json!({})),
            call(2, "q_chat", json!({"prompt": 5})),
        ],
    )
    .await;

    let unknown = responses[0].result.as_ref().unwrap();
    assert_eq!(unknown["isError"], true);
    assert_eq!(unknown["content"][0]["text"], "Unknown tool: q_translate");

    let bad_args = responses[1].result.as_ref().unwrap();
    assert_eq!(bad_args["isError"], true);
    assert_eq!(
        bad_args["content"][0]["text"],
        "Error executing tool q_chat: Argument 'prompt' must be a string"
    );
}

#[tokio::test]
async fn test_protocol_errors_keep_the_session_alive() {
    let server = echo_server();
    let input = concat!(
        "this is not json\n",
        r#"{"jsonrpc":"2.0","id":1,"method":"prompts/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<JsonRpcResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].error.as_ref().unwrap().code, -32700);
    assert_eq!(responses[1].error.as_ref().unwrap().code, -32601);
    assert_eq!(responses[2].result, Some(json!({})));
}

#[tokio::test]
async fn test_invalid_utf8_line_is_parse_error_and_session_continues() {
    let server = echo_server();
    let mut input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\",\"x\":\"\xff\"}\n".to_vec();
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n");
    let mut output = Vec::new();

    server.serve(input.as_slice(), &mut output).await.unwrap();

    let responses: Vec<JsonRpcResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].id, Value::Null);
    assert_eq!(responses[0].error.as_ref().unwrap().code, -32700);
    assert_eq!(responses[1].id, json!(2));
    assert_eq!(responses[1].result, Some(json!({})));
}

#[tokio::test]
async fn test_null_id_is_a_request_not_a_notification() {
    let server = echo_server();
    let responses = exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": null, "method": "ping"}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].id, Value::Null);
    assert_eq!(responses[0].result, Some(json!({})));
}

#[tokio::test]
async fn test_chat_with_missing_executable_reports_os_error() {
    let temp = std::env::temp_dir().join(format!("qmcp-missing-{}", std::process::id()));
    let missing = temp.join("q");
    let config = ExecutorConfig::default().with_executable(missing.to_string_lossy());
    let ctx = ServerContext::new(Arc::new(QCommandRunner::new(config)));
    let server = McpServer::from_context(&ctx);

    let responses = exchange(&server, &[call(1, "q_chat", json!({"prompt": "hello"}))]).await;

    let chat = responses[0].result.as_ref().unwrap();
    assert_eq!(chat["isError"], false);
    let text = chat["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Output:\n\n\nErrors:\n"), "unexpected text: {text}");
    assert!(text.contains("os error"), "unexpected text: {text}");
    assert!(text.contains("No such file or directory"), "unexpected text: {text}");
}
