//! Core types shared across the bridge
//!
//! Transcript messages and tool types used by the catalog, the dispatcher,
//! and the model backend.

mod message;
mod tool;

pub use message::{ChatMessage, ContentPart, MessageContent, MessageRole};
pub use tool::{Tool, ToolCall, ToolDescriptor, ToolOutput};
