//! Configuration file parser for ~/.config/apbridge/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings, since they are
//! usually typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::util::{validate_endpoint, UrlValidationError};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid endpoint in config file: {0}")]
    Endpoint(#[from] UrlValidationError),

    #[error("Invalid timeout_secs in config file: must be at least 1")]
    ZeroTimeout,
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// GraphQL endpoint of the provider.
pub const DEFAULT_ENDPOINT: &str = "https://apnews.com/graphql";

/// Bridge configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint. Only overridden for testing against a local server.
    pub endpoint: String,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            user_agent: format!("apbridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 3] = ["endpoint", "timeout_secs", "user_agent"];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Non-HTTPS, non-localhost endpoint → `Err(ConfigError::Endpoint)`
    /// - `timeout_secs = 0` → `Err(ConfigError::ZeroTimeout)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::read(path, true)
    }

    /// Load configuration from a file the user named explicitly.
    ///
    /// Same as [`Config::load`], except a missing file is `Err(ConfigError::Io)`.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        Self::read(path, false)
    }

    fn read(path: &Path, missing_ok: bool) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if missing_ok && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if missing_ok && e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text and validate the endpoint.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        validate_endpoint(&config.endpoint)?;
        if config.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        tracing::info!(endpoint = %config.endpoint, timeout_secs = config.timeout_secs, "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "https://apnews.com/graphql");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("apbridge/"));
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/apbridge_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_required_file_is_error() {
        let path = Path::new("/tmp/apbridge_test_nonexistent_required_config.toml");
        let err = Config::load_required(path).unwrap_err();
        match err {
            ConfigError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_required_file_loads_when_present() {
        let dir = std::env::temp_dir().join("apbridge_config_test_required");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "timeout_secs = 7\n").unwrap();

        let config = Config::load_required(&path).unwrap();
        assert_eq!(config.timeout_secs, 7);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("apbridge_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  ").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.timeout_secs, 30);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::from_toml("timeout_secs = 5\n").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
endpoint = "http://127.0.0.1:8080/graphql"
timeout_secs = 10
user_agent = "test-agent"
"#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/graphql");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::from_toml("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let result = Config::from_toml("timeout_secs = \"soon\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::from_toml("timeout_secs = 3\nthemes = \"dark\"\n").unwrap();
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_insecure_endpoint_rejected() {
        let result = Config::from_toml("endpoint = \"http://evil.example.com/graphql\"\n");
        assert!(matches!(result, Err(ConfigError::Endpoint(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_toml("timeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("apbridge_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
