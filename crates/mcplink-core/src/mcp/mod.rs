//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to talk to the tool providers declared in a
//! request. Only the SSE transport is supported; providers declaring any
//! other transport are skipped during connect.

mod client;

pub use client::{McpClient, McpError, McpResult};
