//! Production session plumbing over the rmcp client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::logging::Logger;
use crate::mcp::{McpClient, McpResult};
use crate::types::{ToolDescriptor, ToolOutput};

use super::traits::{SessionConnector, ToolSession};

#[async_trait]
impl ToolSession for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        McpClient::list_tools(self).await
    }

    async fn invoke(&self, tool: &str, arguments: Value) -> McpResult<ToolOutput> {
        self.call_tool(tool, arguments).await
    }

    async fn close(self: Box<Self>) -> McpResult<()> {
        McpClient::close(*self).await
    }
}

/// Connector for `type: "sse"` providers
pub struct SseConnector {
    logger: Arc<dyn Logger>,
}

impl SseConnector {
    /// Create a new SSE connector
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl SessionConnector for SseConnector {
    async fn connect(&self, provider: &str, url: &str) -> McpResult<Box<dyn ToolSession>> {
        self.logger
            .debug(&format!("[SseConnector] Opening session for {}", provider));
        let client = McpClient::connect_sse(url, Arc::clone(&self.logger)).await?;
        Ok(Box::new(client))
    }
}
