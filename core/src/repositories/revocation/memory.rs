//! In-process revocation store with TTL expiry
//!
//! Suitable for single-instance deployments and tests. Entries are not shared
//! across processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::errors::DomainResult;

use super::r#trait::RevocationStore;

/// Revocation store backed by a map of key to expiry instant (Unix millis)
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, i64>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRevocationStore {
    /// Create a store driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store driven by `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    fn now_millis(&self) -> i64 {
        self.clock.now_utc().timestamp_millis()
    }

    /// Number of unexpired entries
    pub async fn len(&self) -> usize {
        let now = self.now_millis();
        let entries = self.entries.read().await;
        entries.values().filter(|&&expires_at| expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Seconds until `key` expires, `None` when absent or expired
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let now = self.now_millis();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|&&expires_at| expires_at > now)
            .map(|&expires_at| ((expires_at - now) as u64).div_ceil(1000))
    }

    /// Drop expired entries, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = self.now_millis();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn put(&self, key: &str, ttl_seconds: u64) -> DomainResult<()> {
        let ttl_millis = i64::try_from(ttl_seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        let now = self.now_millis();
        let expires_at = now.saturating_add(ttl_millis);

        // Expired entries are dropped on every write so the map stays bounded
        // by the live revocations.
        let mut entries = self.entries.write().await;
        entries.retain(|_, existing| *existing > now);
        entries.insert(key.to_string(), expires_at);
        Ok(())
    }

    async fn exists(&self, key: &str) -> DomainResult<bool> {
        let now = self.now_millis();
        let entries = self.entries.read().await;
        Ok(entries.get(key).is_some_and(|&expires_at| expires_at > now))
    }
}
