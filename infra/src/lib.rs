//! # Infrastructure Layer
//!
//! This crate wires the IDPS token and encryption services to their external
//! dependencies. It provides:
//! - **Cache**: Redis client with retry logic and the shared revocation store
//! - **Bootstrap**: configuration loading, logging setup and service assembly

use std::sync::Arc;

use idps_core::errors::DomainError;
use idps_core::repositories::revocation::RevocationStore;
use idps_core::services::auth::AuthGate;
use idps_core::services::encryption::{AesGcmCipher, KeyManager};
use idps_core::services::token::{TokenService, TokenServiceConfig};
use idps_shared::config::{AppConfig, ConfigError};
use tracing::{info, warn};

/// Cache module - Redis client and revocation store
pub mod cache;

use cache::{RedisClient, RedisRevocationStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration rejected at startup
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// Service construction error
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Fully wired authentication and encryption services
#[derive(Clone)]
pub struct AuthServices {
    /// Signing secret and cipher key
    pub keys: Arc<KeyManager>,
    /// AES-256-GCM cipher over the configured key
    pub cipher: AesGcmCipher,
    /// Issue, verify and revoke tokens
    pub tokens: TokenService,
    /// Authenticate-then-dispatch gate for protected operations
    pub gate: AuthGate,
    /// The revocation store shared by verifier and revoker
    pub store: Arc<dyn RevocationStore>,
}

/// Assemble the services over an already-connected revocation store
pub fn build_services(
    config: &AppConfig,
    store: Arc<dyn RevocationStore>,
) -> Result<AuthServices, InfrastructureError> {
    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the default signing secret; set JWT_SECRET_KEY");
    }

    let keys = Arc::new(KeyManager::from_config(&config.auth)?);
    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)?;
    let tokens = TokenService::new(keys.clone(), store.clone(), token_config);

    Ok(AuthServices {
        cipher: AesGcmCipher::from_key_manager(&keys),
        gate: AuthGate::new(tokens.verifier()),
        keys,
        tokens,
        store,
    })
}

/// Connect to Redis and assemble the services
///
/// This function:
/// - Validates the configuration
/// - Connects the Redis revocation store
/// - Builds the key manager, token services, cipher and gate
pub async fn initialize(config: &AppConfig) -> Result<AuthServices, InfrastructureError> {
    info!(environment = %config.environment, "Initializing authentication services...");

    config.validate()?;

    let client = RedisClient::new(config.cache.clone()).await?;
    let store: Arc<dyn RevocationStore> = Arc::new(RedisRevocationStore::new(client));
    let services = build_services(config, store)?;

    info!(
        algorithm = %config.auth.jwt.algorithm,
        failure_policy = ?config.auth.jwt.revocation_failure_policy,
        "Authentication services initialized successfully"
    );

    Ok(services)
}

/// Load configuration from the environment, start logging, then [`initialize`]
pub async fn initialize_from_env() -> anyhow::Result<AuthServices> {
    let config = AppConfig::from_env();
    idps_shared::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(initialize(&config).await?)
}
