//! GenaiBackend - model backend over the genai crate
//!
//! genai only streams, so a completion folds the stream: text chunks
//! accumulate, tool calls are captured at stream end. The fold is internal;
//! callers see one finished `ModelTurn`.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use genai::chat::{ChatRequest, ChatStreamEvent};
use genai::Client;

use crate::logging::Logger;
use crate::settings::BackendSettings;
use crate::types::{ChatMessage, Tool, ToolCall};

use super::error::{BackendError, BackendResult};
use super::genai_adapter::{
    chat_options, create_client, from_genai_tool_call, to_genai_messages, to_genai_tools,
};
use super::traits::{ModelBackend, ModelTurn};

/// Model backend over genai-supported LLM APIs
pub struct GenaiBackend {
    settings: BackendSettings,
    client: Client,
    logger: Arc<dyn Logger>,
}

impl GenaiBackend {
    /// Create a backend from settings
    pub fn new(settings: BackendSettings, logger: Arc<dyn Logger>) -> Self {
        let client = create_client(&settings);
        Self {
            settings,
            client,
            logger,
        }
    }

    /// Extract provider ID from a model string (e.g., "openai/gpt-4" -> "openai")
    fn provider_id(&self) -> &str {
        self.settings.model.split('/').next().unwrap_or("model")
    }

    /// Extract model name from a model string (e.g., "openai/gpt-4" -> "gpt-4")
    fn model_name(&self) -> &str {
        self.settings.model.split('/').nth(1).unwrap_or(&self.settings.model)
    }
}

#[async_trait]
impl ModelBackend for GenaiBackend {
    async fn complete(&self, transcript: &[ChatMessage], tools: &[Tool]) -> BackendResult<ModelTurn> {
        self.logger.info(&format!(
            "[GenaiBackend] complete called: model={}, transcript={} messages, tools={}",
            self.settings.model,
            transcript.len(),
            tools.len()
        ));

        let mut chat_req = ChatRequest::new(to_genai_messages(transcript.to_vec()));
        if !tools.is_empty() {
            chat_req = chat_req.with_tools(to_genai_tools(tools.to_vec()));
        }

        let options = chat_options();

        let chat_stream = self
            .client
            .exec_chat_stream(self.model_name(), chat_req, Some(&options))
            .await
            .map_err(|e| BackendError::api(self.provider_id(), e.to_string()))?;

        let mut stream = chat_stream.stream;
        let mut text = String::new();
        let mut tool_calls: Vec<ToolCall> = Vec::new();

        while let Some(event) = stream.next().await {
            let event =
                event.map_err(|e| BackendError::api(self.provider_id(), e.to_string()))?;
            match event {
                ChatStreamEvent::Chunk(chunk) => text.push_str(&chunk.content),
                ChatStreamEvent::End(end) => {
                    if let Some(captured) = end.captured_tool_calls() {
                        for tc in captured.iter() {
                            tool_calls.push(from_genai_tool_call(tc));
                        }
                    }
                }
                _ => {}
            }
        }

        self.logger.debug(&format!(
            "[GenaiBackend] turn complete: {} text chars, {} tool calls",
            text.len(),
            tool_calls.len()
        ));

        Ok(ModelTurn {
            text: if text.is_empty() { None } else { Some(text) },
            tool_calls,
        })
    }
}
