//! Token issuance

use jsonwebtoken::{encode, Header};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::token::{ClaimSet, Claims};
use crate::errors::{DomainResult, TokenError};
use crate::services::encryption::{token_fingerprint, KeyManager};

use super::config::TokenServiceConfig;

/// Signs claim sets into compact bearer tokens
///
/// Holds no mutable state; one instance can serve concurrent requests.
pub struct TokenIssuer {
    keys: Arc<KeyManager>,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Creates an issuer driven by the system clock
    pub fn new(keys: Arc<KeyManager>, config: TokenServiceConfig) -> Self {
        Self::with_clock(keys, config, Arc::new(SystemClock))
    }

    /// Creates an issuer driven by the given clock
    pub fn with_clock(keys: Arc<KeyManager>, config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self { keys, config, clock }
    }

    /// Issues a signed token for `claims`
    ///
    /// # Arguments
    ///
    /// * `claims` - Caller claims; any `iat`/`exp` in them is replaced
    /// * `ttl_seconds` - Lifetime of the token; the configured default when `None`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact token
    /// * `Err(DomainError)` - TTL out of range or signing failed
    pub fn issue(&self, claims: &ClaimSet, ttl_seconds: Option<u64>) -> DomainResult<String> {
        let ttl = ttl_seconds.unwrap_or(self.config.default_ttl_seconds);
        let ttl = i64::try_from(ttl).map_err(|_| TokenError::InvalidClaims {
            message: format!("TTL of {} seconds is out of range", ttl),
        })?;

        let iat = self.clock.unix_now();
        let exp = iat.checked_add(ttl).ok_or_else(|| TokenError::InvalidClaims {
            message: "Expiry overflows the timestamp range".to_string(),
        })?;

        let payload = Claims::new(claims, iat, exp);
        let token = encode(&Header::new(self.config.algorithm), &payload, self.keys.encoding_key())
            .map_err(|e| {
                error!(error = %e, "Failed to sign token");
                TokenError::TokenGenerationFailed
            })?;

        debug!(
            token = %token_fingerprint(&token),
            subject = payload.subject().unwrap_or("-"),
            exp,
            "Token issued"
        );

        Ok(token)
    }

    /// Issues a token for any value that serializes to a JSON object
    pub fn issue_serializable<T: Serialize + ?Sized>(
        &self,
        claims: &T,
        ttl_seconds: Option<u64>,
    ) -> DomainResult<String> {
        let claims = ClaimSet::from_serializable(claims)?;
        self.issue(&claims, ttl_seconds)
    }

    pub fn default_ttl_seconds(&self) -> u64 {
        self.config.default_ttl_seconds
    }
}
