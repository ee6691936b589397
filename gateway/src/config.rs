//! Gateway configuration.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → TOML file (optional, --config)
//!     → environment (EXTERNAL_API_URL, CONNECT_TIMEOUT_MS, BIND_ADDRESS)
//!     → CLI flags (applied by main)
//!     → validate()
//!     → GatewayConfig (immutable from here on)
//! ```
//!
//! All fields have defaults so an empty file, or no file at all, is a valid
//! configuration for local runs against the mock server.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which shape of the public API to serve.
///
/// `Plain` forwards the list in upstream order. `Sorted` sorts the list and
/// additionally mounts `GET /api/todos/count`, which then shadows the
/// by-category listing for a category literally named `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiVariant {
    #[default]
    Plain,
    Sorted,
}

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address the gateway listens on (e.g. "127.0.0.1:8080").
    pub bind_address: String,

    /// Base URL of the upstream todo service.
    pub external_api_url: String,

    /// Ceiling on upstream connection establishment. Does not bound the
    /// time spent waiting for a response.
    pub connect_timeout_ms: Option<u64>,

    pub api_variant: ApiVariant,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            external_api_url: "http://localhost:3000".to_string(),
            connect_timeout_ms: Some(2_000),
            api_variant: ApiVariant::Plain,
        }
    }
}

impl GatewayConfig {
    /// Load from a TOML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        if let Ok(url) = lookup("EXTERNAL_API_URL") {
            self.external_api_url = url;
        }
        if let Ok(bind) = lookup("BIND_ADDRESS") {
            self.bind_address = bind;
        }
        if let Ok(raw) = lookup("CONNECT_TIMEOUT_MS") {
            let ms = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("CONNECT_TIMEOUT_MS is not a number: {raw}")))?;
            self.connect_timeout_ms = Some(ms);
        }
        Ok(())
    }

    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.external_api_url).map_err(|e| {
            ConfigError::Invalid(format!("external_api_url '{}': {e}", self.external_api_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "external_api_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.connect_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("connect_timeout_ms must be > 0".to_string()));
        }
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}
