//! Flat tool catalog
//!
//! Tool names are unique only within their provider, so the catalog hands
//! the model `server_{ordinal}_{name}` identifiers, where the ordinal is
//! the provider's 0-based position among the connected sessions. The
//! identifier is a pure function of (ordinal, local name) and decodes
//! without any side table; it is the sole carrier of routing identity for
//! the whole request.

use thiserror::Error;

use crate::session::SessionRegistry;
use crate::types::Tool;

const FLAT_PREFIX: &str = "server_";

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid tool identifier: {0}")]
    InvalidIdentifier(String),
}

/// Build the flat identifier for a provider ordinal and local tool name
pub fn mangle(ordinal: usize, tool: &str) -> String {
    format!("{}{}_{}", FLAT_PREFIX, ordinal, tool)
}

/// Decode a flat identifier back into (ordinal, local tool name)
///
/// Fails if the string does not match `server_{digits}_{name}`. The
/// ordinal range check lives in [`ToolCatalog::resolve`], which knows how
/// many providers connected.
pub fn demangle(flat: &str) -> Result<(usize, &str), CatalogError> {
    let invalid = || CatalogError::InvalidIdentifier(flat.to_string());

    let rest = flat.strip_prefix(FLAT_PREFIX).ok_or_else(invalid)?;
    let sep = rest.find('_').ok_or_else(invalid)?;
    let (digits, tail) = rest.split_at(sep);
    let tool = &tail[1..];

    if digits.is_empty() || tool.is_empty() {
        return Err(invalid());
    }
    let ordinal: usize = digits.parse().map_err(|_| invalid())?;

    Ok((ordinal, tool))
}

/// A decoded, range-checked tool identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTool {
    /// Owning provider name
    pub provider: String,
    /// Provider position among connected sessions
    pub ordinal: usize,
    /// Provider-local tool name
    pub tool: String,
}

/// The flat tool catalog of one request
pub struct ToolCatalog {
    /// Model-facing tool specs, flat-named, in registration order
    tools: Vec<Tool>,
    /// Connected provider names, indexed by ordinal
    providers: Vec<String>,
}

impl ToolCatalog {
    /// Flatten every connected session's tools into one catalog
    pub fn build(registry: &SessionRegistry) -> Self {
        let mut tools = Vec::new();
        let providers: Vec<String> = registry
            .sessions()
            .iter()
            .map(|s| s.name().to_string())
            .collect();

        for (ordinal, session) in registry.sessions().iter().enumerate() {
            for descriptor in session.tools() {
                tools.push(
                    Tool::new(mangle(ordinal, &descriptor.name), descriptor.description.clone())
                        .with_schema(descriptor.input_schema.clone()),
                );
            }
        }

        Self { tools, providers }
    }

    /// Model-facing tool specs
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog advertises anything
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Decode a flat identifier and range-check its ordinal
    pub fn resolve(&self, flat: &str) -> Result<ResolvedTool, CatalogError> {
        let (ordinal, tool) = demangle(flat)?;
        let provider = self
            .providers
            .get(ordinal)
            .ok_or_else(|| CatalogError::InvalidIdentifier(flat.to_string()))?;

        Ok(ResolvedTool {
            provider: provider.clone(),
            ordinal,
            tool: tool.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::session::testing::{FakeConnector, FakeSession};
    use crate::session::{McpConfig, ProviderTransport};
    use std::sync::Arc;

    #[test]
    fn test_mangle_demangle_roundtrip() {
        for (ordinal, tool) in [
            (0, "search"),
            (1, "read_file"),
            (12, "get_weather_report"),
            (3, "x"),
        ] {
            let flat = mangle(ordinal, tool);
            assert_eq!(demangle(&flat).unwrap(), (ordinal, tool));
        }
    }

    #[test]
    fn test_demangle_preserves_underscores_in_tool_names() {
        assert_eq!(demangle("server_0_read_file").unwrap(), (0, "read_file"));
        assert_eq!(demangle("server_10_a_b_c").unwrap(), (10, "a_b_c"));
    }

    #[test]
    fn test_demangle_rejects_malformed_identifiers() {
        for bad in [
            "search",
            "server_",
            "server_x_search",
            "server_0",
            "server_0_",
            "client_0_search",
            "",
        ] {
            assert!(demangle(bad).is_err(), "expected {:?} to be rejected", bad);
        }
    }

    async fn registry_with(providers: &[(&str, &[&str])]) -> SessionRegistry {
        let mut connector = FakeConnector::new();
        let mut config = McpConfig::default();
        for (name, tool_names) in providers {
            config.providers.insert(
                name.to_string(),
                ProviderTransport::Sse {
                    url: format!("http://{}/sse", name),
                },
            );
            connector = connector.with_session(name, FakeSession::new(tool_names));
        }
        let mut registry = SessionRegistry::new(Arc::new(connector), Arc::new(NoOpLogger));
        registry.connect(&config).await;
        registry
    }

    #[tokio::test]
    async fn test_catalog_disambiguates_same_tool_name_across_providers() {
        let registry = registry_with(&[("alpha", &["x"]), ("beta", &["x"])]).await;

        let catalog = ToolCatalog::build(&registry);
        let names: Vec<&str> = catalog.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["server_0_x", "server_1_x"]);

        let first = catalog.resolve("server_0_x").unwrap();
        let second = catalog.resolve("server_1_x").unwrap();
        assert_eq!(first.provider, "alpha");
        assert_eq!(second.provider, "beta");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_rejects_out_of_range_ordinal() {
        let registry = registry_with(&[("only", &["search"])]).await;
        let catalog = ToolCatalog::build(&registry);

        assert!(catalog.resolve("server_0_search").is_ok());
        assert!(matches!(
            catalog.resolve("server_1_search"),
            Err(CatalogError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_catalog_carries_descriptions_and_schemas() {
        let registry = registry_with(&[("p", &["search"])]).await;
        let catalog = ToolCatalog::build(&registry);

        assert_eq!(catalog.len(), 1);
        let tool = &catalog.tools()[0];
        assert_eq!(tool.name, "server_0_search");
        assert_eq!(tool.description, "search tool");
        assert!(tool.input_schema.is_some());
    }

    #[tokio::test]
    async fn test_empty_registry_builds_empty_catalog() {
        let registry = SessionRegistry::new(Arc::new(FakeConnector::new()), Arc::new(NoOpLogger));
        let catalog = ToolCatalog::build(&registry);
        assert!(catalog.is_empty());
    }
}
