//! Application configuration module
//!
//! Provides the configuration types for the client. Values are resolved in
//! order: explicit builder values, then the optional TOML file in the
//! platform config directory, then defaults.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Base URL of the REST backend
    pub server_url: Option<String>,
    /// WebSocket URL of the message broker
    pub broker_url: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the platform config directory, if a config
    /// file exists there. A missing file yields an empty configuration.
    pub fn load() -> Result<AppConfig, ConfigError> {
        match config_file_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
                let file: FileConfig = toml::from_str(&raw)
                    .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
                AppConfig::builder()
                    .maybe_server_url(file.server_url)
                    .maybe_broker_url(file.broker_url)
                    .build()
            }
            _ => Ok(AppConfig::default()),
        }
    }
}

/// On-disk representation of the config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    broker_url: Option<String>,
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("teamspace").join("config.toml"))
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    broker_url: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: String) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Set the broker URL
    pub fn broker_url(mut self, url: String) -> Self {
        self.broker_url = Some(url);
        self
    }

    fn maybe_server_url(mut self, url: Option<String>) -> Self {
        self.server_url = url.or(self.server_url);
        self
    }

    fn maybe_broker_url(mut self, url: Option<String>) -> Self {
        self.broker_url = url.or(self.broker_url);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        if let Some(ref url) = self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if let Some(ref url) = self.broker_url {
            if !url.starts_with("ws://") && !url.starts_with("wss://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(AppConfig {
            server_url: self.server_url,
            broker_url: self.broker_url,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("could not read config file: {0}")]
    Io(String),
    #[error("could not parse config file: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .server_url("http://127.0.0.1:8080".to_string())
            .broker_url("ws://127.0.0.1:8080/ws".to_string())
            .build()
            .unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.broker_url.as_deref(), Some("ws://127.0.0.1:8080/ws"));
    }

    #[test]
    fn test_rejects_bad_server_scheme() {
        let result = AppConfig::builder()
            .server_url("ftp://example.com".to_string())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_http_broker_url() {
        let result = AppConfig::builder()
            .broker_url("http://example.com/ws".to_string())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_file_config_parse() {
        let file: FileConfig =
            toml::from_str("server_url = \"https://api.example.com\"").unwrap();
        assert_eq!(file.server_url.as_deref(), Some("https://api.example.com"));
        assert!(file.broker_url.is_none());
    }
}
