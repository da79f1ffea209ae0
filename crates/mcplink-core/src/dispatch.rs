//! Tool dispatch
//!
//! Routes a model-requested tool call back to the owning session: decode
//! the flat identifier, find the live session, invoke the provider-local
//! tool. Failures are wrapped with their cause and never retried; whether
//! a failed invocation aborts the request is the conversation driver's
//! call, not this module's.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::{CatalogError, ToolCatalog};
use crate::logging::Logger;
use crate::mcp::McpError;
use crate::session::SessionRegistry;
use crate::types::ToolOutput;

/// Dispatch errors
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The identifier does not decode to a catalog entry
    #[error("invalid tool identifier: {0}")]
    InvalidIdentifier(String),

    /// The identifier decodes, but the provider has no live session
    #[error("no live session for provider {provider} (identifier {identifier})")]
    UnknownProvider { identifier: String, provider: String },

    /// The underlying tool call failed
    #[error("tool {tool} on provider {provider} failed: {source}")]
    Invocation {
        provider: String,
        tool: String,
        #[source]
        source: McpError,
    },
}

impl From<CatalogError> for DispatchError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidIdentifier(flat) => DispatchError::InvalidIdentifier(flat),
        }
    }
}

/// Routes flat-identifier tool calls to live sessions
pub struct ToolDispatcher<'a> {
    registry: &'a SessionRegistry,
    catalog: &'a ToolCatalog,
    logger: Arc<dyn Logger>,
}

impl<'a> ToolDispatcher<'a> {
    /// Create a dispatcher over one request's registry and catalog
    pub fn new(
        registry: &'a SessionRegistry,
        catalog: &'a ToolCatalog,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            registry,
            catalog,
            logger,
        }
    }

    /// Invoke the tool behind a flat identifier
    pub async fn invoke(&self, flat: &str, arguments: Value) -> Result<ToolOutput, DispatchError> {
        let resolved = self.catalog.resolve(flat)?;

        let session =
            self.registry
                .find(&resolved.provider)
                .ok_or_else(|| DispatchError::UnknownProvider {
                    identifier: flat.to_string(),
                    provider: resolved.provider.clone(),
                })?;

        self.logger.info(&format!(
            "[ToolDispatcher] Calling {} on {} with args {}",
            resolved.tool, resolved.provider, arguments
        ));

        let output = session
            .invoke(&resolved.tool, arguments)
            .await
            .map_err(|e| DispatchError::Invocation {
                provider: resolved.provider.clone(),
                tool: resolved.tool.clone(),
                source: e,
            })?;

        self.logger.debug(&format!(
            "[ToolDispatcher] {} returned {} bytes (error: {})",
            resolved.tool,
            output.content.len(),
            output.is_error
        ));

        Ok(output)
    }
}
