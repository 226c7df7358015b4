//! Call command handler: run one tool outside of an MCP session.

use anyhow::Result;
use qmcp_mcp::{CHAT_TOOL, ToolRegistry};
use serde_json::{Map, Value};
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Run `tool` once and return its text.
///
/// A tool-level error (unknown tool, bad arguments) becomes
/// [`CliError::Tool`].
pub async fn run(ctx: &CliContext, tool: &str, prompt: Option<&str>) -> Result<String, CliError> {
    let mut arguments = Map::new();
    if let Some(prompt) = prompt {
        arguments.insert("prompt".to_string(), Value::String(prompt.to_string()));
    } else if tool == CHAT_TOOL {
        return Err(CliError::Arguments(format!("{CHAT_TOOL} requires --prompt")));
    }

    let registry = ToolRegistry::standard(ctx.server());
    let result = registry.call(tool, Some(arguments)).await;

    if result.is_error {
        warn!(%tool, "Tool returned an error result");
        return Err(CliError::Tool(result.text()));
    }
    Ok(result.text())
}

/// Run one tool and print its text result.
pub async fn execute(ctx: &CliContext, tool: &str, prompt: Option<&str>) -> Result<()> {
    let text = run(ctx, tool, prompt).await?;
    println!("{text}");
    Ok(())
}
