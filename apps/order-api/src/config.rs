//! Order API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Order API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to listen on
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub db_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            db_path: "./orders.db".to_string(),
            db_max_connections: 5,
            run_migrations: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("DEPOT_HOST").unwrap_or(defaults.host),

            port: parse_or(&lookup, "DEPOT_PORT", defaults.port)?,

            db_path: lookup("DEPOT_DB_PATH").unwrap_or(defaults.db_path),

            db_max_connections: parse_or(
                &lookup,
                "DEPOT_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,

            run_migrations: parse_or(&lookup, "DEPOT_RUN_MIGRATIONS", defaults.run_migrations)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DEPOT_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
