//! Q CLI tool handlers.
//!
//! Each handler runs one Q CLI invocation and formats the result as text.
//! Handlers never fail: a timed-out or missing `q` still produces text the
//! remote caller can read.

use async_trait::async_trait;
use qmcp_core::{CommandResult, CommandRunner, QInvocation};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use crate::protocol::ContentBlock;
use crate::tools::{
    ToolCallError, ToolHandler, ToolOutput, ToolSpec, content_envelope_schema,
    empty_input_schema, required_str, single_string_input_schema, text_output_schema,
};

pub const CHAT_TOOL: &str = "q_chat";
pub const WHOAMI_TOOL: &str = "q_whoami";
pub const DIAGNOSTIC_TOOL: &str = "q_diagnostic";

const WHOAMI_LABEL: &str = "User information:";
const DIAGNOSTIC_LABEL: &str = "Diagnostic results:";

/// `Output:` block with stdout, plus an `Errors:` block when stderr is non-empty.
pub fn format_chat_text(result: &CommandResult) -> String {
    let mut text = format!("Output:\n{}", result.stdout());
    if !result.stderr().is_empty() {
        text.push_str("\n\nErrors:\n");
        text.push_str(result.stderr());
    }
    text
}

/// Label line followed by stdout. Stderr is not included.
pub fn format_labeled_stdout(label: &str, result: &CommandResult) -> String {
    format!("{label}\n{}", result.stdout())
}

/// Ask Q a question.
pub async fn chat(runner: &dyn CommandRunner, prompt: &str) -> ToolOutput {
    info!("q_chat called with prompt: {}", prompt);

    let result = runner.run(QInvocation::chat(prompt)).await;
    info!("Q CLI returned: {:?}", result);

    let text = format_chat_text(&result);
    info!("Returning response: {}", text);
    ToolOutput::Content(vec![ContentBlock::text(text)])
}

/// Current Q CLI user.
pub async fn whoami(runner: &dyn CommandRunner) -> String {
    info!("q_whoami called");

    let result = runner.run(QInvocation::whoami()).await;
    info!("Q CLI returned: {:?}", result);

    format_labeled_stdout(WHOAMI_LABEL, &result)
}

/// Q CLI self-diagnostics.
pub async fn diagnostic(runner: &dyn CommandRunner) -> String {
    info!("q_diagnostic called");

    let result = runner.run(QInvocation::diagnostic()).await;
    info!("Q CLI returned: {:?}", result);

    format_labeled_stdout(DIAGNOSTIC_LABEL, &result)
}

/// `q_chat` tool.
pub struct ChatTool {
    runner: Arc<dyn CommandRunner>,
}

impl ChatTool {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn spec(runner: Arc<dyn CommandRunner>) -> ToolSpec {
        ToolSpec {
            name: CHAT_TOOL.to_string(),
            description: "Execute Q CLI chat command to interact with AI assistant".to_string(),
            input_schema: single_string_input_schema("prompt", "Prompt to send to Q chat"),
            output_schema: Some(content_envelope_schema()),
            handler: Arc::new(Self::new(runner)),
        }
    }
}

#[async_trait]
impl ToolHandler for ChatTool {
    async fn call(&self, arguments: &Map<String, Value>) -> Result<ToolOutput, ToolCallError> {
        let prompt = required_str(arguments, "prompt")?;
        Ok(chat(self.runner.as_ref(), prompt).await)
    }
}

/// `q_whoami` tool.
pub struct WhoamiTool {
    runner: Arc<dyn CommandRunner>,
}

impl WhoamiTool {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn spec(runner: Arc<dyn CommandRunner>) -> ToolSpec {
        ToolSpec {
            name: WHOAMI_TOOL.to_string(),
            description: "Get current Q CLI user information".to_string(),
            input_schema: empty_input_schema(),
            output_schema: Some(text_output_schema()),
            handler: Arc::new(Self::new(runner)),
        }
    }
}

#[async_trait]
impl ToolHandler for WhoamiTool {
    async fn call(&self, _arguments: &Map<String, Value>) -> Result<ToolOutput, ToolCallError> {
        Ok(ToolOutput::Text(whoami(self.runner.as_ref()).await))
    }
}

/// `q_diagnostic` tool.
pub struct DiagnosticTool {
    runner: Arc<dyn CommandRunner>,
}

impl DiagnosticTool {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn spec(runner: Arc<dyn CommandRunner>) -> ToolSpec {
        ToolSpec {
            name: DIAGNOSTIC_TOOL.to_string(),
            description: "Run Q CLI diagnostic tests".to_string(),
            input_schema: empty_input_schema(),
            output_schema: Some(text_output_schema()),
            handler: Arc::new(Self::new(runner)),
        }
    }
}

#[async_trait]
impl ToolHandler for DiagnosticTool {
    async fn call(&self, _arguments: &Map<String, Value>) -> Result<ToolOutput, ToolCallError> {
        Ok(ToolOutput::Text(diagnostic(self.runner.as_ref()).await))
    }
}
