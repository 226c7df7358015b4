//! ToolRegistry - name to tool mapping, built once at startup.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::context::ServerContext;
use crate::handlers::{ChatTool, DiagnosticTool, WhoamiTool};
use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::ToolSpec;

/// Registered tools, keyed and listed by name.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, ToolSpec>,
}

impl ToolRegistry {
    /// Create an empty registry (for testing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the three Q CLI tools.
    pub fn standard(ctx: &ServerContext) -> Self {
        let mut registry = Self::new();
        registry.register(ChatTool::spec(ctx.runner.clone()));
        registry.register(WhoamiTool::spec(ctx.runner.clone()));
        registry.register(DiagnosticTool::spec(ctx.runner.clone()));
        registry
    }

    /// Add a tool, returning any tool it replaced.
    pub fn register(&mut self, spec: ToolSpec) -> Option<ToolSpec> {
        debug!(tool = %spec.name, "Registering tool");
        self.tools.insert(spec.name.clone(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The `tools/list` payload.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(ToolSpec::definition).collect()
    }

    /// Call a tool by name.
    ///
    /// Unknown tools and bad arguments come back as `isError` results, not
    /// protocol errors, so the client can show them to the model.
    pub async fn call(&self, name: &str, arguments: Option<Map<String, Value>>) -> CallToolResult {
        let Some(spec) = self.tools.get(name) else {
            warn!(tool = %name, "Unknown tool requested");
            return CallToolResult::error(format!("Unknown tool: {name}"));
        };

        let arguments = arguments.unwrap_or_default();
        match spec.handler.call(&arguments).await {
            Ok(output) => output.into_call_result(spec.output_schema.is_some()),
            Err(err) => {
                warn!(tool = %name, error = %err, "Tool call rejected");
                CallToolResult::error(format!("Error executing tool {name}: {err}"))
            }
        }
    }
}
