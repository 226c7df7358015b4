//! Serve command handler.

use anyhow::Result;
use qmcp_mcp::McpServer;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Run the MCP server on stdio until the client closes stdin.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let server = McpServer::from_context(ctx.server());
    server.serve_stdio().await.map_err(CliError::from)?;
    Ok(())
}
