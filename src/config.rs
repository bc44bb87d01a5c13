//! Configuration management for the phonebook service.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honoured when present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;

/// Default ceiling for the `size` query parameter.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 10;

/// Which contact store the service is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store, contents are lost on restart
    Memory,
    /// Postgres via `DATABASE_URL` (requires the `postgres` feature)
    Postgres,
}

/// Configuration for the phonebook service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum page size accepted by contact searches (default: 10)
    pub max_page_size: usize,

    /// Address the HTTP server binds to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Contact store backend (default: memory)
    pub store: StoreBackend,

    /// Database connection string, required for the postgres backend
    pub database_url: Option<String>,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PHONEBOOK_MAX_PAGE_SIZE`: Max page size for searches (default: 10)
    /// - `PHONEBOOK_BIND_ADDR`: Listen address (default: 0.0.0.0:8080)
    /// - `PHONEBOOK_STORE`: `memory` or `postgres` (default: memory)
    /// - `DATABASE_URL`: Postgres connection string (required for postgres)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let max_page_size = Self::parse_env_usize("PHONEBOOK_MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?;
        if max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_MAX_PAGE_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let bind_addr = match env::var("PHONEBOOK_BIND_ADDR") {
            Ok(val) => val
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "PHONEBOOK_BIND_ADDR".to_string(),
                    reason: format!("Must be a socket address like 0.0.0.0:8080, got: {}", val),
                })?,
            Err(_) => Self::default().bind_addr,
        };

        let store = match env::var("PHONEBOOK_STORE") {
            Ok(val) => Self::parse_store(&val)?,
            Err(_) => StoreBackend::Memory,
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL".to_string()));
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            max_page_size,
            bind_addr,
            store,
            database_url,
            log_level,
        })
    }

    fn parse_store(value: &str) -> ConfigResult<StoreBackend> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" => Ok(StoreBackend::Postgres),
            _ => Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_STORE".to_string(),
                reason: format!("Must be 'memory' or 'postgres', got: {}", value),
            }),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreBackend::Memory,
            database_url: None,
            log_level: "info".to_string(),
        }
    }
}
