//! Mock backend for testing
//!
//! Replays a scripted sequence of turns without network dependencies and
//! records what it was called with, so tests can assert on the transcript
//! the driver built. A hanging variant never completes, for deadline
//! tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::types::{ChatMessage, Tool, ToolCall};

use super::error::{BackendError, BackendResult};
use super::traits::{ModelBackend, ModelTurn};

/// Scripted model backend
pub struct MockBackend {
    script: Mutex<VecDeque<BackendResult<ModelTurn>>>,
    transcripts: Mutex<Vec<Vec<ChatMessage>>>,
    catalogs: Mutex<Vec<Vec<Tool>>>,
    hang: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create an empty-scripted backend
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            transcripts: Mutex::new(Vec::new()),
            catalogs: Mutex::new(Vec::new()),
            hang: false,
        }
    }

    /// Backend whose completions never return
    pub fn hanging() -> Self {
        let mut backend = Self::new();
        backend.hang = true;
        backend
    }

    /// Append a text-only turn to the script
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.script.lock().push_back(Ok(ModelTurn::text(text)));
        self
    }

    /// Append a tool-call turn to the script
    pub fn then_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.script.lock().push_back(Ok(ModelTurn::tool_calls(calls)));
        self
    }

    /// Append a failing turn to the script
    pub fn then_error(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .push_back(Err(BackendError::api("mock", message)));
        self
    }

    /// Number of completions served so far
    pub fn completions(&self) -> usize {
        self.transcripts.lock().len()
    }

    /// Transcripts received, one per completion
    pub fn recorded_transcripts(&self) -> Vec<Vec<ChatMessage>> {
        self.transcripts.lock().clone()
    }

    /// Tool catalogs received, one per completion
    pub fn recorded_catalogs(&self) -> Vec<Vec<Tool>> {
        self.catalogs.lock().clone()
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    async fn complete(&self, transcript: &[ChatMessage], tools: &[Tool]) -> BackendResult<ModelTurn> {
        if self.hang {
            return futures::future::pending().await;
        }

        self.transcripts.lock().push(transcript.to_vec());
        self.catalogs.lock().push(tools.to_vec());

        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::InvalidResponse("mock script exhausted".to_string())))
    }
}
