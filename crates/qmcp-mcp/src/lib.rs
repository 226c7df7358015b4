//! MCP adapter for q-cli-mcp.
//!
//! Exposes Q CLI as three MCP tools (`q_chat`, `q_whoami`, `q_diagnostic`)
//! over newline-delimited JSON-RPC 2.0 on stdio. Process execution is
//! reached only through the [`qmcp_core::CommandRunner`] port.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// The runtime adapter is only exercised by the integration tests
#[cfg(test)]
use qmcp_runtime as _;

pub mod context;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod tools;

pub use context::{SERVER_NAME, ServerContext};
pub use handlers::{CHAT_TOOL, ChatTool, DIAGNOSTIC_TOOL, DiagnosticTool, WHOAMI_TOOL, WhoamiTool};
pub use protocol::{
    CallToolResult, ContentBlock, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    LATEST_PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS, ServerInfo, ToolDefinition,
};
pub use registry::ToolRegistry;
pub use server::{McpServer, TransportError};
pub use tools::{ToolCallError, ToolHandler, ToolOutput, ToolSpec};
