//! Token revocation

use jsonwebtoken::{decode, Validation};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::clock::{Clock, SystemClock};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::revocation::{revocation_key, RevocationStore};
use crate::services::encryption::{token_fingerprint, KeyManager};

use super::config::TokenServiceConfig;
use super::store_failure;

#[derive(Debug, Deserialize)]
struct Expiry {
    exp: i64,
}

/// Records tokens on the revocation list
pub struct TokenRevoker {
    keys: Arc<KeyManager>,
    store: Arc<dyn RevocationStore>,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
    unverified: Validation,
}

impl TokenRevoker {
    /// Creates a revoker driven by the system clock
    pub fn new(
        keys: Arc<KeyManager>,
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
    ) -> Self {
        Self::with_clock(keys, store, config, Arc::new(SystemClock))
    }

    /// Creates a revoker driven by the given clock
    pub fn with_clock(
        keys: Arc<KeyManager>,
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        // Only `exp` is read here; whether the token is genuine is irrelevant
        // to how long its revocation entry must live.
        let mut unverified = Validation::new(config.algorithm);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;
        unverified.validate_aud = false;
        unverified.required_spec_claims = HashSet::new();

        Self {
            keys,
            store,
            config,
            clock,
            unverified,
        }
    }

    /// Revokes `token`
    ///
    /// The entry lives at least as long as the token's remaining lifetime, so
    /// an explicit `ttl_seconds` shorter than that is raised. Tokens whose
    /// `exp` cannot be read fall back to `ttl_seconds` or the configured
    /// default. Revoking an already-expired token records nothing. Repeated
    /// revocation is harmless.
    ///
    /// # Errors
    ///
    /// * `TokenError::RevocationStoreUnavailable` - the store write failed or timed out
    pub async fn revoke(&self, token: &str, ttl_seconds: Option<u64>) -> DomainResult<()> {
        let remaining = self.remaining_lifetime(token);

        let ttl = match (ttl_seconds, remaining) {
            (Some(explicit), Some(remaining)) => explicit.max(remaining),
            (Some(explicit), None) => explicit,
            (None, Some(remaining)) => remaining,
            (None, None) => self.config.default_ttl_seconds,
        };

        if ttl == 0 {
            debug!(token = %token_fingerprint(token), "Token already expired; nothing to revoke");
            return Ok(());
        }

        let key = revocation_key(token, self.config.key_mode);
        match timeout(self.config.store_timeout, self.store.put(&key, ttl)).await {
            Ok(Ok(())) => {
                info!(token = %token_fingerprint(token), ttl_seconds = ttl, "Token revoked");
                Ok(())
            }
            Ok(Err(e)) => {
                let failure = store_failure(e);
                error!(error = %failure, "Failed to record revocation");
                Err(failure.into())
            }
            Err(_) => {
                let failure = TokenError::store_unavailable(format!(
                    "write timed out after {}ms",
                    self.config.store_timeout.as_millis()
                ));
                error!(error = %failure, "Failed to record revocation");
                Err(failure.into())
            }
        }
    }

    /// Seconds until the token's `exp`, or `None` when it cannot be read
    fn remaining_lifetime(&self, token: &str) -> Option<u64> {
        let exp = decode::<Expiry>(token, self.keys.decoding_key(), &self.unverified)
            .ok()?
            .claims
            .exp;
        Some(u64::try_from(exp.saturating_sub(self.clock.unix_now())).unwrap_or(0))
    }
}
