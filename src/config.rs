//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent sent on outgoing requests
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl HttpConfig {
    /// Per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Profile cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Profile cache TTL in seconds (default: 86400)
    pub profile_ttl: u64,
    /// Maximum cached profiles (default: 2000)
    pub max_entries: u64,
    /// Concurrent resolutions during cache warming (default: 10)
    pub warm_concurrency: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (ACTORLENS_*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("http.user_agent", format!("ActorLens/{}", env!("CARGO_PKG_VERSION")))?
            .set_default("http.timeout_seconds", 10)?
            .set_default("cache.profile_ttl", 86400)?
            .set_default("cache.max_entries", 2000)?
            .set_default("cache.warm_concurrency", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (ACTORLENS_*)
            .add_source(
                Environment::with_prefix("ACTORLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.http.user_agent.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "http.user_agent must not be empty".to_string(),
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "http.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.cache.warm_concurrency == 0 {
            return Err(crate::error::AppError::Config(
                "cache.warm_concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                user_agent: format!("ActorLens/{}", env!("CARGO_PKG_VERSION")),
                timeout_seconds: 10,
            },
            cache: CacheConfig {
                profile_ttl: 86_400,
                max_entries: 2000,
                warm_concurrency: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
