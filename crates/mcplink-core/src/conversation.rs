//! Conversation driver
//!
//! Drives the model ⇄ tools loop for one request over an append-only
//! transcript. Each cycle: ask the model; if it requested tools, record
//! the requests as one assistant entry, execute them in model order
//! (each result appended before the next call runs), and ask again with
//! the grown transcript. A response without tool calls ends the loop and
//! its text is the answer.
//!
//! A failed tool invocation is fed back to the model as error tool output
//! rather than aborting the request; identifiers that do not decode to an
//! advertised tool abort, since there is no session to attribute the
//! error to.

use std::sync::Arc;

use crate::backend::ModelBackend;
use crate::dispatch::{DispatchError, ToolDispatcher};
use crate::error::{BridgeError, BridgeResult};
use crate::logging::Logger;
use crate::types::{ChatMessage, Tool, ToolCall};

enum DriverState {
    AwaitingModel,
    ExecutingTools(Vec<ToolCall>),
    Done,
    Failed(BridgeError),
}

/// The model ⇄ tools orchestration loop of one request
pub struct ConversationDriver<'a> {
    backend: &'a dyn ModelBackend,
    dispatcher: &'a ToolDispatcher<'a>,
    tools: &'a [Tool],
    max_rounds: u32,
    logger: Arc<dyn Logger>,
}

impl<'a> ConversationDriver<'a> {
    /// Create a driver over one request's backend, dispatcher, and catalog
    pub fn new(
        backend: &'a dyn ModelBackend,
        dispatcher: &'a ToolDispatcher<'a>,
        tools: &'a [Tool],
        max_rounds: u32,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            backend,
            dispatcher,
            tools,
            max_rounds,
            logger,
        }
    }

    /// Run the loop to completion and return the model's final text
    pub async fn run(&self, query: &str) -> BridgeResult<String> {
        let mut transcript = vec![ChatMessage::user(query)];
        let mut output = String::new();
        let mut rounds = 0u32;
        let mut state = DriverState::AwaitingModel;

        loop {
            state = match state {
                DriverState::AwaitingModel => {
                    match self.backend.complete(&transcript, self.tools).await {
                        Err(e) => {
                            self.logger
                                .error(&format!("[ConversationDriver] Model call failed: {}", e));
                            DriverState::Failed(BridgeError::Backend(e))
                        }
                        Ok(turn) if !turn.has_tool_calls() => {
                            if let Some(text) = turn.text {
                                output.push_str(&text);
                            }
                            DriverState::Done
                        }
                        Ok(turn) => {
                            rounds += 1;
                            if rounds > self.max_rounds {
                                self.logger.error(&format!(
                                    "[ConversationDriver] Round limit of {} exceeded",
                                    self.max_rounds
                                ));
                                DriverState::Failed(BridgeError::RoundLimit(self.max_rounds))
                            } else {
                                self.logger.info(&format!(
                                    "[ConversationDriver] Round {}: model requested {} tool call(s)",
                                    rounds,
                                    turn.tool_calls.len()
                                ));
                                transcript.push(ChatMessage::tool_use(&turn.tool_calls));
                                DriverState::ExecutingTools(turn.tool_calls)
                            }
                        }
                    }
                }
                DriverState::ExecutingTools(calls) => {
                    let mut next = DriverState::AwaitingModel;
                    for call in &calls {
                        match self.dispatcher.invoke(&call.name, call.input.clone()).await {
                            Ok(result) => {
                                transcript
                                    .push(ChatMessage::tool_result(call.id.clone(), result.content));
                            }
                            Err(
                                e @ (DispatchError::InvalidIdentifier(_)
                                | DispatchError::UnknownProvider { .. }),
                            ) => {
                                self.logger.error(&format!(
                                    "[ConversationDriver] Aborting on call id {}: {}",
                                    call.id, e
                                ));
                                next = DriverState::Failed(BridgeError::InvalidIdentifier(
                                    e.to_string(),
                                ));
                                break;
                            }
                            Err(e) => {
                                self.logger.warn(&format!(
                                    "[ConversationDriver] Tool call {} failed, feeding error to model: {}",
                                    call.id, e
                                ));
                                transcript.push(ChatMessage::tool_result(
                                    call.id.clone(),
                                    format!("Error: {}", e),
                                ));
                            }
                        }
                    }
                    next
                }
                DriverState::Done => return Ok(output),
                DriverState::Failed(e) => return Err(e),
            };
        }
    }
}
