//! Tools command handler.

use anyhow::{Context, Result};
use qmcp_mcp::ToolRegistry;

use crate::bootstrap::CliContext;

/// Tool definitions as pretty-printed JSON.
pub fn render(ctx: &CliContext) -> Result<String> {
    let registry = ToolRegistry::standard(ctx.server());
    serde_json::to_string_pretty(&registry.definitions())
        .context("failed to serialize tool definitions")
}

/// Print the tool definitions the server advertises in `tools/list`.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{}", render(ctx)?);
    Ok(())
}
