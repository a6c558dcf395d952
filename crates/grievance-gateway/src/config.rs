//! Configuration file parsing for the Gateway.
//!
//! Loads the bind address and upstream model settings from TOML, then
//! applies environment overrides. The API key is normally supplied through
//! `GEMINI_API_KEY` rather than written to disk.

use grievance_llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the upstream API key
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable overriding the upstream model id
pub const ENV_MODEL: &str = "GEMINI_MODEL";
/// Environment variable overriding the upstream base URL
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
/// Environment variable overriding the bind address
pub const ENV_BIND_ADDRESS: &str = "GATEWAY_BIND_ADDRESS";
/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "GATEWAY_PORT";

/// Gateway configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A value could not be interpreted
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Gateway configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 5000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Upstream model settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Upstream generative model settings
#[derive(Clone, Deserialize)]
pub struct UpstreamConfig {
    /// API root (default: the public Google endpoint)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model id (default: "gemini-1.5-flash-latest")
    #[serde(default = "default_model")]
    pub model: String,

    /// Pre-shared API key
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// Default port: 5000
fn default_bind_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: GatewayConfig = toml::from_str(&contents)?;

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Build configuration from defaults and the environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = GatewayConfig::default();

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    ///
    /// Unset or empty variables leave the current value untouched.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = get(ENV_API_KEY) {
            self.upstream.api_key = Some(api_key);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.upstream.model = model;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.upstream.base_url = base_url;
        }
        if let Some(bind_address) = get(ENV_BIND_ADDRESS) {
            self.bind_address = bind_address;
        }
        if let Some(port) = get(ENV_PORT) {
            self.bind_port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_PORT.to_string(), port.clone()))?;
        }

        Ok(())
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;

        if self.upstream.model.trim().is_empty() {
            return Err(ConfigError::MissingField("upstream.model".to_string()));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("upstream.base_url".to_string()));
        }

        Ok(())
    }

    /// The configured API key
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.upstream
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("upstream.api_key".to_string()))
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        GatewayConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
            upstream: UpstreamConfig {
                base_url: "http://localhost:8089".to_string(),
                model: "gemini-test".to_string(),
                api_key: Some("test-api-key-do-not-use-in-production".to_string()),
            },
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
