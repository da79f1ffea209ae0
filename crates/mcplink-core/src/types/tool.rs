//! Tool types
//!
//! `ToolDescriptor` is a tool as a provider advertises it (name unique only
//! within that provider). `Tool` is the model-facing spec, named by the
//! flat catalog identifier. `ToolCall` and `ToolOutput` are the two halves
//! of one invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool as advertised by one provider
///
/// Immutable once fetched; the name is unique within the owning provider
/// but not across providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Local tool name (provider-scoped)
    pub name: String,
    /// Human description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Tool definition handed to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name as the model sees it (a flat catalog identifier)
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl Tool {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// Tool call requested by the model
///
/// The id is model-issued and opaque, unique within one model response.
/// Arguments are passed through unvalidated; schema enforcement is the
/// provider's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Model-issued identifier for this call
    pub id: String,
    /// Flat catalog identifier of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// Normalized output of one tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result content, flattened to text
    pub content: String,
    /// Whether the provider flagged this result as an error
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    /// Create a successful output
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error output
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("server_0_search", "Search the index").with_schema(json!({
            "type": "object",
            "properties": {
                "q": { "type": "string" }
            },
            "required": ["q"]
        }));

        assert_eq!(tool.name, "server_0_search");
        assert!(tool.input_schema.is_some());
    }

    #[test]
    fn test_tool_call_roundtrip() {
        let call = ToolCall::new("call_123", "server_0_search", json!({"q": "cats"}));
        let json = serde_json::to_string(&call).unwrap();
        let back: ToolCall = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "call_123");
        assert_eq!(back.input["q"], "cats");
    }

    #[test]
    fn test_tool_output() {
        let ok = ToolOutput::success("3 results");
        assert!(!ok.is_error);

        let err = ToolOutput::error("connection reset");
        assert!(err.is_error);
    }
}
