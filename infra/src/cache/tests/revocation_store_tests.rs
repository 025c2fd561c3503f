//! Tests for the Redis revocation store
//!
//! These require a running Redis instance.

use idps_core::repositories::revocation::{revocation_key, RevocationStore};
use idps_shared::config::{CacheConfig, RevocationKeyMode};

use crate::cache::{RedisClient, RedisRevocationStore, REVOKED_MARKER};

async fn prefixed_client() -> RedisClient {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix("idps-test");

    RedisClient::new(config).await.unwrap()
}

/// Returns a client addressing raw keys alongside the store
async fn store() -> (RedisClient, RedisRevocationStore) {
    let client = prefixed_client().await;
    (client.without_prefix(), RedisRevocationStore::new(client))
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_store_ignores_client_prefix() {
    let prefixed = prefixed_client().await;
    let raw = prefixed.without_prefix();
    let store = RedisRevocationStore::new(prefixed.clone());
    let key = revocation_key("prefixed.client.token", RevocationKeyMode::Raw);

    store.put(&key, 60).await.unwrap();

    assert!(raw.exists(&key).await.unwrap());
    assert!(!prefixed.exists(&key).await.unwrap());
    assert!(store.exists(&key).await.unwrap());

    raw.delete(&key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_put_writes_marker_with_ttl() {
    let (client, store) = store().await;
    let key = revocation_key("aaa.bbb.ccc", RevocationKeyMode::Raw);

    store.put(&key, 120).await.unwrap();

    assert!(store.exists(&key).await.unwrap());
    assert_eq!(client.get(&key).await.unwrap().as_deref(), Some(REVOKED_MARKER));
    assert!(matches!(store.remaining_ttl(&key).await.unwrap(), Some(t) if t > 100 && t <= 120));

    client.delete(&key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_zero_ttl_writes_nothing() {
    let (_, store) = store().await;
    let key = revocation_key("zero.ttl.token", RevocationKeyMode::Raw);

    store.put(&key, 0).await.unwrap();
    assert!(!store.exists(&key).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_put_twice_keeps_one_entry() {
    let (client, store) = store().await;
    let key = revocation_key("twice.revoked.token", RevocationKeyMode::Sha256);

    store.put(&key, 60).await.unwrap();
    store.put(&key, 300).await.unwrap();

    assert!(store.exists(&key).await.unwrap());
    assert!(matches!(store.remaining_ttl(&key).await.unwrap(), Some(t) if t > 60));

    client.delete(&key).await.unwrap();
}
