//! Session registry
//!
//! Owns every live session for one request. Connect is best-effort per
//! provider; teardown attempts every registered session exactly once and
//! never fails.

use std::sync::Arc;

use serde_json::Value;

use crate::logging::Logger;
use crate::mcp::McpResult;
use crate::types::{ToolDescriptor, ToolOutput};

use super::config::{McpConfig, ProviderTransport};
use super::traits::{SessionConnector, ToolSession};

/// One successfully connected provider
pub struct Session {
    name: String,
    tools: Vec<ToolDescriptor>,
    session: Box<dyn ToolSession>,
}

impl Session {
    /// Provider name (the registry key)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tools the provider advertised at connect time
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Invoke a tool by its provider-local name
    pub async fn invoke(&self, tool: &str, arguments: Value) -> McpResult<ToolOutput> {
        self.session.invoke(tool, arguments).await
    }
}

/// Live sessions for one request, in registration order
pub struct SessionRegistry {
    connector: Arc<dyn SessionConnector>,
    sessions: Vec<Session>,
    logger: Arc<dyn Logger>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new(connector: Arc<dyn SessionConnector>, logger: Arc<dyn Logger>) -> Self {
        Self {
            connector,
            sessions: Vec::new(),
            logger,
        }
    }

    /// Connect to every declared provider, best-effort
    ///
    /// Each provider is attempted independently; a failed connect or tool
    /// listing is logged and skipped. Providers declaring an unsupported
    /// transport are excluded up front. Never fails: zero successes just
    /// leaves the registry empty.
    pub async fn connect(&mut self, config: &McpConfig) {
        for (name, transport) in &config.providers {
            let url = match transport {
                ProviderTransport::Sse { url } => url,
                ProviderTransport::Unsupported => {
                    self.logger.warn(&format!(
                        "[SessionRegistry] Skipping {}: unsupported transport type",
                        name
                    ));
                    continue;
                }
            };

            match self.open(name, url).await {
                Ok(session) => {
                    let tool_names: Vec<&str> =
                        session.tools.iter().map(|t| t.name.as_str()).collect();
                    self.logger.info(&format!(
                        "[SessionRegistry] Connected to {} at {} with tools: {:?}",
                        name, url, tool_names
                    ));
                    self.sessions.push(session);
                }
                Err(e) => {
                    self.logger.error(&format!(
                        "[SessionRegistry] Failed to connect to {}: {}",
                        name, e
                    ));
                }
            }
        }
    }

    /// Connect one provider and fetch its tool list
    async fn open(&self, name: &str, url: &str) -> McpResult<Session> {
        let session = self.connector.connect(name, url).await?;

        let tools = match session.list_tools().await {
            Ok(tools) => tools,
            Err(e) => {
                // Half-open session: close it before skipping the provider
                if let Err(close_err) = session.close().await {
                    self.logger.error(&format!(
                        "[SessionRegistry] Close after failed tool listing for {}: {}",
                        name, close_err
                    ));
                }
                return Err(e);
            }
        };

        Ok(Session {
            name: name.to_string(),
            tools,
            session,
        })
    }

    /// Whether any provider connected
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of connected providers
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Connected sessions in registration order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Look up a live session by provider name
    pub fn find(&self, provider: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.name == provider)
    }

    /// Close every registered session, in registration order
    ///
    /// Each close is attempted exactly once; failures are logged and do
    /// not stop the remaining closes. A second call is a no-op.
    pub async fn teardown(&mut self) {
        for session in self.sessions.drain(..) {
            let Session { name, session, .. } = session;
            if let Err(e) = session.close().await {
                self.logger
                    .error(&format!("[SessionRegistry] Cleanup error for {}: {}", name, e));
            }
        }
    }
}
