//! Dashboard configuration
//!
//! Values come from defaults, then an optional YAML file, then
//! `STEAMGRAPH_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding [`GatewayConfig::endpoint`]
pub const ENV_ENDPOINT: &str = "STEAMGRAPH_ENDPOINT";
/// Environment variable overriding [`ServerConfig::address`]
pub const ENV_ADDRESS: &str = "STEAMGRAPH_ADDRESS";
/// Environment variable overriding [`ServerConfig::port`]
pub const ENV_PORT: &str = "STEAMGRAPH_PORT";

/// Media type requested from the endpoint
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Query gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// SPARQL query endpoint URL
    pub endpoint: String,
    /// Result format sent as `format` parameter and `Accept` header
    pub format: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3030/steam/query".to_string(),
            format: SPARQL_RESULTS_JSON.to_string(),
        }
    }
}

/// Dashboard HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Result sizes used by the page controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLimits {
    pub search: u32,
    pub recommendations: u32,
    pub genres: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            search: 20,
            recommendations: 12,
            genres: 20,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub gateway: GatewayConfig,
    pub server: ServerConfig,
    pub limits: PageLimits,
}

impl DashboardConfig {
    /// Load from an optional YAML file and the process environment
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `STEAMGRAPH_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.gateway.endpoint = endpoint;
        }
        if let Some(address) = lookup(ENV_ADDRESS) {
            self.server.address = address;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Env { var: ENV_PORT, value: port })?;
        }
        Ok(())
    }
}
