//! Configuration for the Ledger API service.

use ledger_core::LedgerConfig;
use ledger_db::PoolOptions;
use std::time::Duration;

/// Ledger API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Database pool tuning
    pub pool: PoolOptions,
    /// Ledger core configuration
    pub ledger: LedgerConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8000,
            database_url: "sqlite://ledger.db".to_string(),
            pool: PoolOptions::default(),
            ledger: LedgerConfig::default(),
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Database
        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            defaults.pool.max_connections,
        )?;

        // Server
        let http_port = parse_or(&lookup, "HTTP_PORT", defaults.http_port)?;

        // Request timeout; zero would expire every request
        let request_timeout_secs: u64 = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        // Metrics
        let metrics_enabled = parse_or(&lookup, "METRICS_ENABLED", defaults.metrics_enabled)?;

        // Business rules
        let mut ledger = LedgerConfig::new();
        if let Some(raw) = lookup("MIN_CLIENT_AGE") {
            let age = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("MIN_CLIENT_AGE"))?;
            ledger = ledger.with_min_client_age(age);
        }

        Ok(Self {
            http_port,
            database_url,
            pool: PoolOptions { max_connections },
            ledger,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
