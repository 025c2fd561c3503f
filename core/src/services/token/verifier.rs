//! Token verification

use jsonwebtoken::{decode, Validation};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use idps_shared::config::RevocationFailurePolicy;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::token::{Claims, CLAIM_EXPIRES_AT};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::revocation::{revocation_key, RevocationStore};
use crate::services::encryption::{token_fingerprint, KeyManager};

use super::config::TokenServiceConfig;
use super::store_failure;

/// Validates bearer tokens and recovers their claims
///
/// Checks run in a fixed order: revocation, then signature, then expiry. A
/// revoked token is therefore reported as revoked even once it has expired.
pub struct TokenVerifier {
    keys: Arc<KeyManager>,
    store: Arc<dyn RevocationStore>,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier driven by the system clock
    pub fn new(
        keys: Arc<KeyManager>,
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
    ) -> Self {
        Self::with_clock(keys, store, config, Arc::new(SystemClock))
    }

    /// Creates a verifier driven by the given clock
    pub fn with_clock(
        keys: Arc<KeyManager>,
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut validation = Validation::new(config.algorithm);
        // Expiry is checked against the injected clock instead
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from([CLAIM_EXPIRES_AT.to_string()]);

        Self {
            keys,
            store,
            config,
            clock,
            validation,
        }
    }

    /// Verifies `token` and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Token is unrevoked, correctly signed and unexpired
    /// * `Err(TokenError::TokenRevoked)` - Token is on the revocation list
    /// * `Err(TokenError::TokenInvalid)` - Malformed, tampered, wrong algorithm or wrong key
    /// * `Err(TokenError::TokenExpired)` - Current time is at or past `exp`
    /// * `Err(TokenError::RevocationStoreUnavailable)` - Store unreachable under fail-closed
    pub async fn verify(&self, token: &str) -> DomainResult<Claims> {
        self.check_revocation(token).await?;

        let claims = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                debug!(token = %token_fingerprint(token), error = %e, "Token rejected");
                TokenError::invalid(e)
            })?
            .claims;

        if claims.is_expired_at(self.clock.unix_now()) {
            debug!(token = %token_fingerprint(token), exp = claims.exp, "Token expired");
            return Err(TokenError::TokenExpired.into());
        }

        Ok(claims)
    }

    /// Fails if the token is revoked, or if the store cannot answer and the
    /// policy is fail-closed
    async fn check_revocation(&self, token: &str) -> DomainResult<()> {
        let key = revocation_key(token, self.config.key_mode);

        let failure = match timeout(self.config.store_timeout, self.store.exists(&key)).await {
            Ok(Ok(true)) => {
                debug!(token = %token_fingerprint(token), "Token is revoked");
                return Err(TokenError::TokenRevoked.into());
            }
            Ok(Ok(false)) => return Ok(()),
            Ok(Err(e)) => store_failure(e),
            Err(_) => TokenError::store_unavailable(format!(
                "lookup timed out after {}ms",
                self.config.store_timeout.as_millis()
            )),
        };

        match self.config.failure_policy {
            RevocationFailurePolicy::FailClosed => {
                error!(error = %failure, "Revocation check failed; rejecting token");
                Err(failure.into())
            }
            RevocationFailurePolicy::FailOpen => {
                warn!(error = %failure, "Revocation check failed; continuing without it");
                Ok(())
            }
        }
    }
}
