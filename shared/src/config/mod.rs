//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, revocation policy and secret encryption
//! - `cache` - Redis configuration for the revocation store
//! - `environment` - Environment detection and logging configuration
//!
//! Values are read from the process environment (optionally seeded from a
//! `.env` file). The core crates never read the environment themselves; they
//! receive these typed structs from the process bootstrap.

pub mod auth;
pub mod cache;
pub mod environment;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{
    AuthConfig, EncryptionConfig, JwtConfig, RevocationFailurePolicy, RevocationKeyMode,
};
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Configuration problems detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Production environment must not use the default signing secret")]
    DefaultSecretInProduction,

    #[error("Missing required config variables: {0}")]
    Missing(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Revocation store configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment, reading `.env` first when present
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();

        Self {
            environment,
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Validate the configuration before wiring services
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET_KEY".to_string()));
        }
        if self.cache.url.is_empty() {
            return Err(ConfigError::Missing("REDIS_URL".to_string()));
        }
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecretInProduction);
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back on absence or parse failure
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
