//! Redis-backed revocation store
//!
//! Entries are written as `SETEX <key> <ttl> "1"` so they disappear on their
//! own once the covered token could no longer verify anyway. The store is
//! shared by every service instance pointing at the same Redis.

use async_trait::async_trait;
use tracing::debug;

use idps_core::errors::{DomainResult, TokenError};
use idps_core::repositories::revocation::RevocationStore;

use super::redis_client::RedisClient;

/// Value stored under each revocation key
pub const REVOKED_MARKER: &str = "1";

/// Revocation store over a shared Redis instance
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    /// Create the store over `client`
    ///
    /// Any key prefix configured on the client is ignored: revocation keys are
    /// shared with other writers and must stay `token:blacklist:<token>`.
    pub fn new(client: RedisClient) -> Self {
        Self {
            client: client.without_prefix(),
        }
    }

    /// Seconds until a revocation entry expires, for diagnostics
    pub async fn remaining_ttl(&self, key: &str) -> DomainResult<Option<i64>> {
        self.client
            .ttl(key)
            .await
            .map_err(|e| TokenError::store_unavailable(e).into())
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn put(&self, key: &str, ttl_seconds: u64) -> DomainResult<()> {
        // SETEX rejects a zero expiry
        if ttl_seconds == 0 {
            debug!("Skipping revocation entry with zero TTL");
            return Ok(());
        }

        self.client
            .set_with_expiry(key, REVOKED_MARKER, ttl_seconds)
            .await
            .map_err(|e| TokenError::store_unavailable(e).into())
    }

    async fn exists(&self, key: &str) -> DomainResult<bool> {
        self.client
            .exists(key)
            .await
            .map_err(|e| TokenError::store_unavailable(e).into())
    }
}
