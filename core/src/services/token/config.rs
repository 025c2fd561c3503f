//! Configuration for the token services

use jsonwebtoken::Algorithm;
use std::time::Duration;

use idps_shared::config::{JwtConfig, RevocationFailurePolicy, RevocationKeyMode};

use crate::errors::{DomainError, DomainResult};

/// Default token lifetime when the caller gives none (24 hours)
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 86400;

/// Configuration shared by the issuer, verifier and revoker
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Signing algorithm; verification rejects every other algorithm
    pub algorithm: Algorithm,
    /// Token lifetime used when `issue` gets no TTL
    pub default_ttl_seconds: u64,
    /// Behavior when the revocation store is unreachable during `verify`
    pub failure_policy: RevocationFailurePolicy,
    /// Upper bound on each revocation-store call
    pub store_timeout: Duration,
    /// How tokens map to revocation keys
    pub key_mode: RevocationKeyMode,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            default_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            failure_policy: RevocationFailurePolicy::FailClosed,
            store_timeout: Duration::from_secs(2),
            key_mode: RevocationKeyMode::Raw,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the JWT section of the application configuration
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - the algorithm is not HS256, HS384 or HS512
    pub fn from_jwt_config(jwt: &JwtConfig) -> DomainResult<Self> {
        Ok(Self {
            algorithm: parse_hmac_algorithm(&jwt.algorithm)?,
            default_ttl_seconds: jwt.access_token_expiry,
            failure_policy: jwt.revocation_failure_policy,
            store_timeout: Duration::from_millis(jwt.revocation_store_timeout_ms),
            key_mode: jwt.revocation_key_mode,
        })
    }
}

/// Parse an algorithm name, accepting only the HMAC-SHA-2 family
pub fn parse_hmac_algorithm(name: &str) -> DomainResult<Algorithm> {
    match name.trim().to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(DomainError::Validation {
            message: format!("Unsupported signing algorithm: {}", other),
        }),
    }
}
