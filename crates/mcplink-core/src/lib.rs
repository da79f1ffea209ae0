//! mcplink Core
//!
//! The MCP → LLM bridge: accept a query plus a list of MCP tool
//! providers, open a session to each, advertise every discovered tool to
//! a language model under one flat namespace, and loop model ⇄ tools
//! until the model answers or the request deadline fires.
//!
//! ## Request flow
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mcplink_core::{
//!     backend::GenaiBackend,
//!     lifecycle::RequestController,
//!     logging::ConsoleLogger,
//!     session::{McpConfig, SseConnector},
//!     settings::Settings,
//! };
//!
//! let settings = Settings::from_yaml_file("config.yaml")?;
//! let logger = Arc::new(ConsoleLogger::new());
//!
//! let controller = RequestController::new(
//!     Arc::new(GenaiBackend::new(settings.backend.clone(), logger.clone())),
//!     Arc::new(SseConnector::new(logger.clone())),
//!     settings.request.clone(),
//!     logger,
//! );
//!
//! let config: McpConfig = serde_json::from_value(mcp_config)?;
//! let answer = controller.handle("how many cats?", &config).await?;
//! ```
//!
//! Each request gets a fresh session registry and transcript; nothing is
//! shared across requests beyond the controller itself. Teardown of every
//! connected session is guaranteed on success, failure, and timeout.

pub mod backend;
pub mod catalog;
pub mod conversation;
pub mod dispatch;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod mcp;
pub mod session;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use types::{
    ChatMessage, ContentPart, MessageContent, MessageRole, Tool, ToolCall, ToolDescriptor,
    ToolOutput,
};

pub use backend::{BackendError, BackendResult, GenaiBackend, MockBackend, ModelBackend, ModelTurn};

pub use catalog::{demangle, mangle, CatalogError, ResolvedTool, ToolCatalog};

pub use dispatch::{DispatchError, ToolDispatcher};

pub use error::{BridgeError, BridgeResult};

pub use lifecycle::RequestController;

pub use logging::{ConsoleLogger, Logger, NoOpLogger};

pub use mcp::{McpClient, McpError, McpResult};

pub use session::{
    McpConfig, ProviderTransport, Session, SessionConnector, SessionRegistry, SseConnector,
    ToolSession,
};

pub use settings::{BackendSettings, RequestSettings, ServerSettings, Settings, SettingsError};

pub use conversation::ConversationDriver;
