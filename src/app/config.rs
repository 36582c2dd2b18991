use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Default broker URL
const DEFAULT_BROKER_URL: &str = "ws://127.0.0.1:8080/ws";

/// Application configuration wrapper. Resolution order: environment
/// variables, then the config file, then defaults. The broker address is
/// environment-derived like everything else, never hard-coded at call sites.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        let file = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable config file");
            AppConfig::default()
        });
        let mut builder = AppConfig::builder();
        if let Some(url) = std::env::var("TEAMSPACE_API_URL")
            .ok()
            .or(file.server_url)
        {
            builder = builder.server_url(url);
        }
        if let Some(url) = std::env::var("TEAMSPACE_BROKER_URL")
            .ok()
            .or(file.broker_url)
        {
            builder = builder.broker_url(url);
        }
        let app = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid configured URL, falling back to defaults");
            AppConfig::default()
        });
        Self { app }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn broker_url(&self) -> &str {
        self.app.broker_url.as_deref().unwrap_or(DEFAULT_BROKER_URL)
    }
}
