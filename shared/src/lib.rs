//! Shared configuration and logging bootstrap for the IDPS cloud services
//!
//! This crate provides functionality used by the core and infrastructure crates:
//! - Configuration types loaded from the environment
//! - Tracing subscriber initialization

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, EncryptionConfig, Environment, JwtConfig,
    LoggingConfig, RevocationFailurePolicy, RevocationKeyMode,
};
pub use logging::init_tracing;
