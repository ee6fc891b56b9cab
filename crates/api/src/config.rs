//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the field schedule
//! API server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8001)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request deadline (default: 30)
//! - `DB_MAX_CONNECTIONS`: Connection pool size (default: 10)
//! - `DB_ACQUIRE_TIMEOUT_SECONDS`: How long a query waits for a pooled connection (default: 5)
//! - `SCHEDULE_TIMEZONE`: IANA zone that defines "today" for generation (default: "Asia/Jakarta")

use std::env;
use std::time::Duration;

use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use fieldsched_db::PoolSettings;
use tracing::Level;

/// Configuration for the field schedule API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub db_max_connections: u32,

    pub db_acquire_timeout: u64,

    /// Zone used to compute the first day of a generated month
    pub schedule_timezone: Tz,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - DB_MAX_CONNECTIONS, DB_ACQUIRE_TIMEOUT_SECONDS or API_REQUEST_TIMEOUT_SECONDS
    ///   is set but is not a non-negative integer
    /// - The SCHEDULE_TIMEZONE value is not a known IANA zone
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "8001")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let db_max_connections = var("DB_MAX_CONNECTIONS", "10")
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;
        let db_acquire_timeout = var("DB_ACQUIRE_TIMEOUT_SECONDS", "5")
            .parse()
            .wrap_err("Invalid DB_ACQUIRE_TIMEOUT_SECONDS value")?;

        // Logging settings
        let log_level = parse_log_level(&var("LOG_LEVEL", "info"));

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .wrap_err("Invalid API_REQUEST_TIMEOUT_SECONDS value")?;

        // Scheduling settings
        let schedule_timezone = parse_timezone(&var("SCHEDULE_TIMEZONE", "Asia/Jakarta"))?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            db_max_connections,
            db_acquire_timeout,
            schedule_timezone,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8001")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout),
        }
    }
}

/// Unknown levels fall back to `INFO`.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|e| eyre!("Invalid SCHEDULE_TIMEZONE value '{}': {}", raw, e))
}
