//! MCP stdio server loop.
//!
//! Newline-delimited JSON-RPC 2.0: one message per line on stdin, one
//! response per line on stdout. Only protocol messages are written to
//! stdout; all logging goes to stderr through `tracing`.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::context::ServerContext;
use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ServerCapabilities, ServerInfo, ToolsCapability, negotiate_protocol_version,
};
use crate::registry::ToolRegistry;

/// Errors that stop the transport loop.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to communicate over stdio: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Tools-only MCP server.
#[derive(Debug)]
pub struct McpServer {
    registry: ToolRegistry,
    server_info: ServerInfo,
}

impl McpServer {
    pub const fn new(registry: ToolRegistry, server_info: ServerInfo) -> Self {
        Self {
            registry,
            server_info,
        }
    }

    /// Server with the standard Q CLI tools.
    pub fn from_context(ctx: &ServerContext) -> Self {
        Self::new(ToolRegistry::standard(ctx), ctx.server_info.clone())
    }

    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub const fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<(), TransportError> {
        info!(
            "Starting {} {} on stdio",
            self.server_info.name, self.server_info.version
        );
        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    /// Serve on arbitrary streams until the reader hits EOF.
    ///
    /// Requests are handled one at a time in arrival order.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), TransportError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.handle_message(trimmed).await
                }
                Err(e) => {
                    warn!(error = %e, "Received a line that is not valid UTF-8");
                    Some(JsonRpcResponse::failure(
                        Value::Null,
                        JsonRpcError::parse_error(e),
                    ))
                }
            };

            if let Some(response) = response {
                let mut payload = serde_json::to_vec(&response)?;
                payload.push(b'\n');
                writer.write_all(&payload).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Received malformed JSON");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(e),
                ));
            }
        };

        // A notification has no `id` member at all; `"id": null` still gets a reply
        let has_id = value.get("id").is_some();
        let id_hint = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Received invalid JSON-RPC request");
                return Some(JsonRpcResponse::failure(
                    id_hint,
                    JsonRpcError::invalid_request(e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id_hint,
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        if !has_id {
            debug!(method = %request.method, "Received notification");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        debug!(method = %request.method, %id, "Handling request");
        Some(match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                warn!(method = %request.method, code = error.code, "{}", error.message);
                JsonRpcResponse::failure(id, error)
            }
        })
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => self.initialize(params),
            "ping" => Ok(Value::Object(Map::new())),
            "tools/list" => to_result(&ToolsListResult {
                tools: self.registry.definitions(),
            }),
            "tools/call" => self.call_tool(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?,
            None => InitializeParams::default(),
        };

        let protocol_version = negotiate_protocol_version(params.protocol_version.as_deref());
        let client = params
            .client_info
            .as_ref()
            .map_or("unknown", |client| client.name.as_str());
        info!(%client, %protocol_version, "Client initialized session");

        to_result(&InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: self.server_info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
        let params: CallToolParams =
            serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?;

        info!(tool = %params.name, "Calling tool");
        let result = self.registry.call(&params.name, params.arguments).await;
        to_result(&result)
    }
}

#[derive(Serialize)]
struct ToolsListResult {
    tools: Vec<crate::protocol::ToolDefinition>,
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(JsonRpcError::internal_error)
}
