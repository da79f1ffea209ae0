//! In-memory session fakes shared by the crate's tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::mcp::{McpError, McpResult};
use crate::types::{ToolDescriptor, ToolOutput};

use super::traits::{SessionConnector, ToolSession};

type InvokeFn = dyn Fn(&str, &Value) -> McpResult<ToolOutput> + Send + Sync;

/// Scriptable in-memory session
pub(crate) struct FakeSession {
    tools: Vec<ToolDescriptor>,
    list_error: Option<String>,
    close_error: bool,
    on_invoke: Box<InvokeFn>,
    closes: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeSession {
    /// Session advertising the given tool names; every invoke returns "ok"
    pub fn new(tool_names: &[&str]) -> Self {
        Self {
            tools: tool_names
                .iter()
                .map(|name| ToolDescriptor {
                    name: (*name).to_string(),
                    description: format!("{} tool", name),
                    input_schema: serde_json::json!({"type": "object"}),
                })
                .collect(),
            list_error: None,
            close_error: false,
            on_invoke: Box::new(|_, _| Ok(ToolOutput::success("ok"))),
            closes: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Session whose tool listing fails
    pub fn failing_list(message: &str) -> Self {
        let mut session = Self::new(&[]);
        session.list_error = Some(message.to_string());
        session
    }

    /// Session whose close fails (the attempt is still counted)
    pub fn failing_close(tool_names: &[&str]) -> Self {
        let mut session = Self::new(tool_names);
        session.close_error = true;
        session
    }

    /// Script the invoke behavior
    pub fn on_invoke(
        mut self,
        f: impl Fn(&str, &Value) -> McpResult<ToolOutput> + Send + Sync + 'static,
    ) -> Self {
        self.on_invoke = Box::new(f);
        self
    }

    /// Handle observing how many times close ran
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }

    /// Handle observing every (tool, arguments) invocation
    pub fn call_log(&self) -> Arc<Mutex<Vec<(String, Value)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ToolSession for FakeSession {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        match &self.list_error {
            Some(message) => Err(McpError::Protocol(message.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn invoke(&self, tool: &str, arguments: Value) -> McpResult<ToolOutput> {
        self.calls.lock().push((tool.to_string(), arguments.clone()));
        (self.on_invoke)(tool, &arguments)
    }

    async fn close(self: Box<Self>) -> McpResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.close_error {
            Err(McpError::Protocol("close failed".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Connector handing out pre-scripted sessions by provider name
pub(crate) struct FakeConnector {
    outcomes: Mutex<HashMap<String, McpResult<Box<dyn ToolSession>>>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(HashMap::new()),
        }
    }

    /// Provider connects successfully with the given session
    pub fn with_session(self, provider: &str, session: FakeSession) -> Self {
        self.outcomes
            .lock()
            .insert(provider.to_string(), Ok(Box::new(session)));
        self
    }

    /// Provider fails to connect
    pub fn with_failure(self, provider: &str, message: &str) -> Self {
        self.outcomes.lock().insert(
            provider.to_string(),
            Err(McpError::ConnectionFailed(message.to_string())),
        );
        self
    }
}

#[async_trait]
impl SessionConnector for FakeConnector {
    async fn connect(&self, provider: &str, _url: &str) -> McpResult<Box<dyn ToolSession>> {
        self.outcomes
            .lock()
            .remove(provider)
            .unwrap_or_else(|| Err(McpError::ConnectionFailed(format!("no route to {}", provider))))
    }
}
