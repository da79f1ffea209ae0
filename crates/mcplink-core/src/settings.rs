//! Process settings
//!
//! An immutable `Settings` value is deserialized from a YAML file once at
//! startup and passed by reference into the request controller. There is
//! no process-wide configuration global.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Settings load/parse errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level settings file structure
///
/// ```yaml
/// backend:
///   model: openai/gpt-4o-mini
///   api_key: sk-...
///   base_url: https://api.openai.com/v1/
/// request:
///   deadline_secs: 300
///   max_rounds: 25
/// server:
///   listen_addr: 0.0.0.0:8001
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Model backend block
    pub backend: BackendSettings,

    /// Per-request limits
    #[serde(default)]
    pub request: RequestSettings,

    /// HTTP server block
    #[serde(default)]
    pub server: ServerSettings,
}

/// Model backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// Model identifier, optionally provider-prefixed (e.g. "openai/gpt-4o-mini")
    pub model: String,

    /// Explicit API key; when absent the backend falls through to its
    /// provider-native resolution
    #[serde(default)]
    pub api_key: Option<String>,

    /// Custom API base URL for OpenAI-compatible endpoints
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Per-request limits
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSettings {
    /// Wall-clock budget for an entire request, connect through final answer
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    /// Cap on model/tool round trips within one request
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Address the server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_deadline_secs() -> u64 {
    300
}

fn default_max_rounds() -> u32 {
    25
}

fn default_listen_addr() -> String {
    "0.0.0.0:8001".to_string()
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
            max_rounds: default_max_rounds(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_applied() {
        let settings: Settings = serde_yaml::from_str("backend:\n  model: openai/gpt-4o-mini\n").unwrap();
        assert_eq!(settings.request.deadline_secs, 300);
        assert_eq!(settings.request.max_rounds, 25);
        assert_eq!(settings.server.listen_addr, "0.0.0.0:8001");
        assert!(settings.backend.api_key.is_none());
    }

    #[test]
    fn test_full_file_roundtrip() {
        let yaml = r"
backend:
  model: openai/gpt-4o-mini
  api_key: sk-test
  base_url: http://localhost:4000/v1/
request:
  deadline_secs: 30
  max_rounds: 5
server:
  listen_addr: 127.0.0.1:9000
";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let settings = Settings::from_yaml_file(file.path()).unwrap();
        assert_eq!(settings.backend.model, "openai/gpt-4o-mini");
        assert_eq!(settings.backend.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.request.deadline_secs, 30);
        assert_eq!(settings.request.max_rounds, 5);
        assert_eq!(settings.server.listen_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_missing_backend_is_an_error() {
        let result: Result<Settings, _> = serde_yaml::from_str("request:\n  deadline_secs: 10\n");
        assert!(result.is_err());
    }
}
