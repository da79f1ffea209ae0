//! Session trait seams
//!
//! The registry and dispatcher only ever see these traits; the production
//! implementations wrap the rmcp client, tests inject in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::mcp::McpResult;
use crate::types::{ToolDescriptor, ToolOutput};

/// One live, stateful connection to a provider
#[async_trait]
pub trait ToolSession: Send + Sync {
    /// Fetch the provider's tool descriptors
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>>;

    /// Invoke a tool by its provider-local name
    async fn invoke(&self, tool: &str, arguments: Value) -> McpResult<ToolOutput>;

    /// Close the session, consuming it
    async fn close(self: Box<Self>) -> McpResult<()>;
}

/// Opens sessions for the registry
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Connect to one provider and complete the protocol handshake
    async fn connect(&self, provider: &str, url: &str) -> McpResult<Box<dyn ToolSession>>;
}
