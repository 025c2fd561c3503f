//! Revocation store trait: the TTL key-value contract the token services need.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// External shared store that marks tokens revoked until a TTL elapses
///
/// Implementations report transport and timeout problems as
/// `TokenError::RevocationStoreUnavailable`, never as "not present".
/// Read-after-write consistency for a single key is the store's
/// responsibility: a `put` that has returned must be visible to every
/// later `exists`.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Set `key` with a time-to-live, replacing any existing entry
    ///
    /// # Arguments
    /// * `key` - Revocation key, see [`revocation_key`](super::revocation_key)
    /// * `ttl_seconds` - Entry lifetime; callers never pass 0
    ///
    /// # Returns
    /// * `Ok(())` - Entry written
    /// * `Err(DomainError)` - Store unreachable or rejected the write
    async fn put(&self, key: &str, ttl_seconds: u64) -> DomainResult<()>;

    /// Whether an unexpired entry exists for `key`
    ///
    /// # Returns
    /// * `Ok(true)` - Entry present
    /// * `Ok(false)` - Entry absent or expired
    /// * `Err(DomainError)` - Store unreachable
    async fn exists(&self, key: &str) -> DomainResult<bool>;
}
