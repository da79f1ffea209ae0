//! Caller-supplied provider configuration
//!
//! Each transport kind has a fixed, validated field set; a known kind with
//! a malformed shape (e.g. `sse` without `url`) is rejected at
//! deserialization, before any connect attempt. Unrecognized kinds
//! deserialize to `Unsupported` and are skipped during connect.

use std::collections::BTreeMap;

use serde::Deserialize;

/// How to reach one provider
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderTransport {
    /// Long-lived SSE connection to the given URL
    Sse { url: String },
    /// Any transport kind this bridge does not speak
    #[serde(other)]
    Unsupported,
}

/// The provider list of one request
///
/// Keyed by unique provider name. Registration order is the map's
/// iteration order; flat tool identifiers are derived fresh per request,
/// so only within-request consistency matters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderTransport>,
}
