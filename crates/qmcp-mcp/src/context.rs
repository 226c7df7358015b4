//! ServerContext - dependencies shared by every tool handler.
//!
//! Built once by the composition root and passed explicitly to the
//! registry; there are no process-wide singletons.

use qmcp_core::CommandRunner;
use std::sync::Arc;

use crate::protocol::ServerInfo;

/// Name reported to clients in `initialize`.
pub const SERVER_NAME: &str = "Q CLI MCP Server";

/// Execution context for tool handlers.
#[derive(Clone)]
pub struct ServerContext {
    /// Runs Q CLI invocations.
    pub runner: Arc<dyn CommandRunner>,

    /// Identity reported to MCP clients.
    pub server_info: ServerInfo,
}

impl ServerContext {
    /// Create a context with the default server identity.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Builder method to override the server identity.
    #[must_use]
    pub fn with_server_info(mut self, server_info: ServerInfo) -> Self {
        self.server_info = server_info;
        self
    }
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("server_info", &self.server_info)
            .finish_non_exhaustive()
    }
}
