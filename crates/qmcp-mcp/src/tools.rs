//! Tool abstractions: handler trait, tool spec, and handler output.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use thiserror::Error;

use crate::protocol::{CallToolResult, ContentBlock, ToolDefinition};

/// Argument errors raised before a handler runs Q CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolCallError {
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Argument '{name}' must be a {expected}")]
    InvalidArgument { name: String, expected: &'static str },
}

/// What a handler hands back to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// Plain text; the transport wraps it in a single text block.
    Text(String),
    /// A ready-made content envelope.
    Content(Vec<ContentBlock>),
}

impl ToolOutput {
    /// The `{"content": [...]}` envelope for this output.
    pub fn envelope(&self) -> Value {
        json!({ "content": self.content_blocks() })
    }

    fn content_blocks(&self) -> Vec<ContentBlock> {
        match self {
            Self::Text(text) => vec![ContentBlock::text(text.clone())],
            Self::Content(blocks) => blocks.clone(),
        }
    }

    /// Convert into a `tools/call` result.
    ///
    /// With `structured` set, the result also carries structured content
    /// matching the tool's declared output schema: `{"result": text}` for
    /// text, the envelope itself for content.
    pub fn into_call_result(self, structured: bool) -> CallToolResult {
        let structured_content = structured.then(|| match &self {
            Self::Text(text) => json!({ "result": text }),
            Self::Content(_) => self.envelope(),
        });

        CallToolResult {
            content: self.content_blocks(),
            structured_content,
            is_error: false,
        }
    }
}

/// A callable tool body.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with already-decoded JSON arguments.
    async fn call(&self, arguments: &Map<String, Value>) -> Result<ToolOutput, ToolCallError>;
}

/// Registry entry: a tool's name, schemas, and handler.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Option<Value>,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolSpec {
    /// The `tools/list` entry for this tool.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
            output_schema: self.output_schema.clone(),
        }
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_output_schema", &self.output_schema.is_some())
            .finish_non_exhaustive()
    }
}

/// Fetch a required string argument.
pub fn required_str<'a>(
    arguments: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a str, ToolCallError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Err(ToolCallError::MissingArgument(name.to_string())),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ToolCallError::InvalidArgument {
            name: name.to_string(),
            expected: "string",
        }),
    }
}

/// Input schema for tools without parameters.
pub fn empty_input_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

/// Input schema with a single required string parameter.
pub fn single_string_input_schema(name: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            name: { "type": "string", "description": description }
        },
        "required": [name]
    })
}

/// Output schema for tools that return plain text.
pub fn text_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "result": { "type": "string" } },
        "required": ["result"]
    })
}

/// Output schema for tools that return a content envelope.
pub fn content_envelope_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "content": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string", "enum": ["text"] },
                        "text": { "type": "string" }
                    },
                    "required": ["type", "text"]
                }
            }
        },
        "required": ["content"]
    })
}
