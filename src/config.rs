//! Runtime configuration
//!
//! Values come from `STOCKLENS_*` environment variables, with defaults
//! suited to a local single-node deployment.

use crate::error::{AppError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "STOCKLENS_DB_PATH";
pub const ENV_HOST: &str = "STOCKLENS_HOST";
pub const ENV_PORT: &str = "STOCKLENS_PORT";
pub const ENV_POOL_SIZE: &str = "STOCKLENS_POOL_SIZE";
pub const ENV_CORS: &str = "STOCKLENS_CORS";

/// Server and storage configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Maximum number of pooled SQLite connections
    pub pool_size: u32,
    /// Allow any origin on the JSON API
    pub cors_permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("stocklens.db"),
            host: "127.0.0.1".to_string(),
            port: 5000,
            pool_size: 8,
            cors_permissive: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            config.database_path = PathBuf::from(path.trim());
        }

        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(ENV_PORT) {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{} must be a port number: {}", ENV_PORT, e)))?;
        }

        if let Some(size) = lookup(ENV_POOL_SIZE) {
            let size: u32 = size.trim().parse().map_err(|e| {
                AppError::Config(format!("{} must be a positive integer: {}", ENV_POOL_SIZE, e))
            })?;
            if size == 0 {
                return Err(AppError::Config(format!("{} must be at least 1", ENV_POOL_SIZE)));
            }
            config.pool_size = size;
        }

        if let Some(cors) = lookup(ENV_CORS) {
            config.cors_permissive = parse_bool(&cors)
                .ok_or_else(|| AppError::Config(format!("{} must be true or false", ENV_CORS)))?;
        }

        Ok(config)
    }

    /// Address the API server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address {}:{}: {}", self.host, self.port, e)))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
