use std::time::Duration;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub port: u16,
    pub environment: String,
    pub frontend_urls: Vec<String>,
    pub transaction_timeout: Duration,
    pub recent_activity_limit: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidFormat(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigError::MissingVariable(key.to_uppercase()),
            other => ConfigError::InvalidFormat(other.to_string()),
        }
    }
}

// Keys are the lowercased environment variable names.
#[derive(Debug, Deserialize)]
struct RawConfig {
    database_url: Option<String>,
    database_max_connections: u32,
    server_port: u16,
    environment: String,
    cors_allowed_origins: String,
    transaction_timeout_ms: u64,
    recent_activity_limit: usize,
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("database_max_connections", 10)?
        .set_default("server_port", 8080)?
        .set_default("environment", "development")?
        .set_default("cors_allowed_origins", "http://localhost:3000")?
        .set_default("transaction_timeout_ms", 5000)?
        .set_default("recent_activity_limit", 10)?)
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let source = with_defaults()?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        Self::from_config(source)
    }

    pub fn from_config(source: Config) -> Result<Self, ConfigError> {
        let raw: RawConfig = source.try_deserialize()?;

        if raw.transaction_timeout_ms == 0 {
            return Err(ConfigError::InvalidFormat(
                "TRANSACTION_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        // Parse allowed origins
        let frontend_urls = raw
            .cors_allowed_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(AppConfig {
            database_url: raw.database_url.filter(|url| !url.trim().is_empty()),
            max_connections: raw.database_max_connections,
            port: raw.server_port,
            environment: raw.environment,
            frontend_urls,
            transaction_timeout: Duration::from_millis(raw.transaction_timeout_ms),
            recent_activity_limit: raw.recent_activity_limit,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
