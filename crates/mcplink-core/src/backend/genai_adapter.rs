//! Adapter between bridge types and genai types
//!
//! All genai type conversions live here: transcript messages (including
//! tool-use and tool-response turns), tool specs, chat options, and client
//! construction. Auth uses the explicit key from settings when one is
//! configured, never genai's env var lookup.

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, Tool as GenaiTool,
    ToolCall as GenaiToolCall, ToolResponse as GenaiToolResponse,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{adapter::AdapterKind, Client, ModelIden, ServiceTarget};

use crate::settings::BackendSettings;
use crate::types::{ChatMessage, ContentPart, MessageContent, MessageRole, Tool, ToolCall};

// ============================================================================
// Message Conversion: bridge -> genai
// ============================================================================

/// Convert one transcript entry to a genai message
pub fn to_genai_message(msg: ChatMessage) -> GenaiMessage {
    match (msg.role, msg.content) {
        // Tool turn: the output for one call id
        (MessageRole::Tool, MessageContent::Parts(parts)) => {
            let (call_id, content) = parts
                .into_iter()
                .find_map(|p| match p {
                    ContentPart::ToolResult {
                        tool_use_id,
                        content,
                    } => Some((tool_use_id, content)),
                    _ => None,
                })
                .unwrap_or_default();
            GenaiMessage::from(GenaiToolResponse::new(call_id, content))
        }
        (MessageRole::Tool, MessageContent::Text(text)) => {
            // A tool turn without a call id cannot be attributed; degrade to text
            GenaiMessage::from(GenaiToolResponse::new(String::new(), text))
        }
        // Assistant turn carrying tool-call requests
        (MessageRole::Assistant, MessageContent::Parts(parts)) => {
            let mut calls = Vec::new();
            let mut texts = Vec::new();
            for part in parts {
                match part {
                    ContentPart::ToolUse { id, name, input } => calls.push(GenaiToolCall {
                        call_id: id,
                        fn_name: name,
                        fn_arguments: input,
                        thought_signatures: None,
                    }),
                    ContentPart::Text { text } => texts.push(text),
                    ContentPart::ToolResult { .. } => {}
                }
            }
            if calls.is_empty() {
                GenaiMessage::assistant(texts.join("\n"))
            } else {
                GenaiMessage::from(calls)
            }
        }
        (role, content) => {
            let text = match content {
                MessageContent::Text(text) => text,
                MessageContent::Parts(parts) => parts
                    .into_iter()
                    .filter_map(|p| match p {
                        ContentPart::Text { text } => Some(text),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            match role {
                MessageRole::System => GenaiMessage::system(text),
                MessageRole::Assistant => GenaiMessage::assistant(text),
                _ => GenaiMessage::user(text),
            }
        }
    }
}

/// Convert a transcript to genai messages
pub fn to_genai_messages(messages: Vec<ChatMessage>) -> Vec<GenaiMessage> {
    messages.into_iter().map(to_genai_message).collect()
}

// ============================================================================
// Tool Conversion: bridge -> genai
// ============================================================================

/// Convert a catalog tool spec to a genai tool
pub fn to_genai_tool(tool: Tool) -> GenaiTool {
    let mut genai_tool = GenaiTool::new(&tool.name).with_description(&tool.description);

    if let Some(schema) = tool.input_schema {
        genai_tool = genai_tool.with_schema(schema);
    }

    genai_tool
}

/// Convert catalog tools to genai tools
pub fn to_genai_tools(tools: Vec<Tool>) -> Vec<GenaiTool> {
    tools.into_iter().map(to_genai_tool).collect()
}

// ============================================================================
// Options
// ============================================================================

/// Chat options for a bridge completion
///
/// Tool calls must be captured from the stream so the completed turn can
/// carry them.
pub fn chat_options() -> GenaiOptions {
    GenaiOptions::default().with_capture_tool_calls(true)
}

// ============================================================================
// Response Conversion: genai -> bridge
// ============================================================================

/// Convert a genai tool call to a bridge tool call
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolCall {
    ToolCall {
        id: tc.call_id.clone(),
        name: tc.fn_name.clone(),
        input: tc.fn_arguments.clone(),
    }
}

// ============================================================================
// Client Creation
// ============================================================================

/// Create a genai Client from the backend settings
///
/// When `api_key` is set, auth resolves to it for every model. When
/// `base_url` is set, the endpoint is overridden and the OpenAI-compatible
/// adapter is used, which covers local gateways and proxy deployments.
pub fn create_client(settings: &BackendSettings) -> Client {
    let mut builder = Client::builder();

    if let Some(api_key) = settings.api_key.clone() {
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );
        builder = builder.with_auth_resolver(auth_resolver);
    }

    if let Some(base_url) = settings.base_url.clone() {
        let target_resolver = ServiceTargetResolver::from_resolver_fn(
            move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { ref model, .. } = target;

                let endpoint = Endpoint::from_owned(base_url.clone());
                let resolved_model = ModelIden::new(AdapterKind::OpenAI, model.model_name.clone());

                Ok(ServiceTarget {
                    endpoint,
                    auth: target.auth, // Auth is handled by AuthResolver
                    model: resolved_model,
                })
            },
        );
        builder = builder.with_service_target_resolver(target_resolver);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_conversion() {
        let msg = ChatMessage::user("Hello, world!");
        let genai_msg = to_genai_message(msg);
        assert!(matches!(genai_msg.role, genai::chat::ChatRole::User));
    }

    #[test]
    fn test_tool_use_message_becomes_tool_calls() {
        let calls = vec![ToolCall::new("call_1", "server_0_search", json!({"q": "cats"}))];
        let genai_msg = to_genai_message(ChatMessage::tool_use(&calls));
        assert!(matches!(genai_msg.role, genai::chat::ChatRole::Assistant));
    }

    #[test]
    fn test_tool_result_message_becomes_tool_response() {
        let genai_msg = to_genai_message(ChatMessage::tool_result("call_1", "3 results"));
        assert!(matches!(genai_msg.role, genai::chat::ChatRole::Tool));
    }

    #[test]
    fn test_tool_conversion() {
        let tool = Tool::new("server_0_get_weather", "Get weather for a location").with_schema(
            json!({
                "type": "object",
                "properties": {
                    "location": { "type": "string" }
                }
            }),
        );

        let genai_tool = to_genai_tool(tool);
        assert_eq!(genai_tool.name, "server_0_get_weather");
    }

    #[test]
    fn test_tool_call_roundtrip() {
        let genai_call = GenaiToolCall {
            call_id: "call_9".to_string(),
            fn_name: "server_1_lookup".to_string(),
            fn_arguments: json!({"id": 7}),
            thought_signatures: None,
        };
        let call = from_genai_tool_call(&genai_call);
        assert_eq!(call.id, "call_9");
        assert_eq!(call.name, "server_1_lookup");
        assert_eq!(call.input["id"], 7);
    }
}
