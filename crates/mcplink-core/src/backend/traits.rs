//! Model backend trait definition

use async_trait::async_trait;

use crate::types::{ChatMessage, Tool, ToolCall};

use super::error::BackendResult;

/// One model response
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    /// Text content, if the model produced any
    pub text: Option<String>,
    /// Tool-call requests, in the order the model issued them
    pub tool_calls: Vec<ToolCall>,
}

impl ModelTurn {
    /// A plain text turn
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A turn requesting tool calls
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            text: None,
            tool_calls: calls,
        }
    }

    /// Whether the model requested any tools
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Language model backend
///
/// A single completion over the full transcript with the tool catalog
/// attached; no streaming to the caller, no retries.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Complete the conversation one turn
    async fn complete(&self, transcript: &[ChatMessage], tools: &[Tool]) -> BackendResult<ModelTurn>;
}
