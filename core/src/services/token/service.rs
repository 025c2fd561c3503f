//! Facade bundling issuer, verifier and revoker over shared keys and store

use serde::Serialize;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::token::{ClaimSet, Claims};
use crate::errors::DomainResult;
use crate::repositories::revocation::RevocationStore;
use crate::services::encryption::KeyManager;

use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::revoker::TokenRevoker;
use super::verifier::TokenVerifier;

/// Issue, verify and revoke tokens through one handle
///
/// The three components share one key manager, store and clock, so a token
/// issued here verifies here, and a revocation recorded here is seen here.
#[derive(Clone)]
pub struct TokenService {
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
    revoker: Arc<TokenRevoker>,
}

impl TokenService {
    /// Creates the service driven by the system clock
    pub fn new(
        keys: Arc<KeyManager>,
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
    ) -> Self {
        Self::with_clock(keys, store, config, Arc::new(SystemClock))
    }

    /// Creates the service driven by the given clock
    pub fn with_clock(
        keys: Arc<KeyManager>,
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::with_clock(
                keys.clone(),
                config.clone(),
                clock.clone(),
            )),
            verifier: Arc::new(TokenVerifier::with_clock(
                keys.clone(),
                store.clone(),
                config.clone(),
                clock.clone(),
            )),
            revoker: Arc::new(TokenRevoker::with_clock(keys, store, config, clock)),
        }
    }

    pub fn issue(&self, claims: &ClaimSet, ttl_seconds: Option<u64>) -> DomainResult<String> {
        self.issuer.issue(claims, ttl_seconds)
    }

    pub fn issue_serializable<T: Serialize + ?Sized>(
        &self,
        claims: &T,
        ttl_seconds: Option<u64>,
    ) -> DomainResult<String> {
        self.issuer.issue_serializable(claims, ttl_seconds)
    }

    pub async fn verify(&self, token: &str) -> DomainResult<Claims> {
        self.verifier.verify(token).await
    }

    pub async fn revoke(&self, token: &str, ttl_seconds: Option<u64>) -> DomainResult<()> {
        self.revoker.revoke(token, ttl_seconds).await
    }

    pub fn issuer(&self) -> Arc<TokenIssuer> {
        self.issuer.clone()
    }

    pub fn verifier(&self) -> Arc<TokenVerifier> {
        self.verifier.clone()
    }

    pub fn revoker(&self) -> Arc<TokenRevoker> {
        self.revoker.clone()
    }
}
