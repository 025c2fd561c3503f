//! Integration tests for the Redis-backed token services
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p idps_infra --test redis_integration -- --ignored

use rand::Rng;

use idps_core::domain::entities::ClaimSet;
use idps_core::errors::{DomainError, TokenError};
use idps_infra::{initialize, AuthServices};
use idps_shared::config::AppConfig;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn services() -> AuthServices {
    init_logging();

    let mut config = AppConfig::default();
    config.auth.jwt.secret = "redis-integration-secret".to_string();
    if let Ok(url) = std::env::var("REDIS_URL") {
        config.cache.url = url;
    }

    initialize(&config).await.expect("Failed to initialize services")
}

fn unique_subject() -> String {
    format!("car-{}", rand::thread_rng().gen::<u32>())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_revocation_visible_to_second_instance() {
    let node_a = services().await;
    let node_b = services().await;

    let token = node_a
        .tokens
        .issue(&ClaimSet::new().with("subject", unique_subject()), Some(300))
        .unwrap();
    assert!(node_b.tokens.verify(&token).await.is_ok());

    node_a.tokens.revoke(&token, None).await.unwrap();
    assert!(matches!(
        node_b.tokens.verify(&token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_revoke_twice_is_harmless() {
    let services = services().await;
    let token = services
        .tokens
        .issue(&ClaimSet::new().with("subject", unique_subject()), Some(300))
        .unwrap();

    services.tokens.revoke(&token, None).await.unwrap();
    services.tokens.revoke(&token, Some(60)).await.unwrap();

    assert!(matches!(
        services.tokens.verify(&token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_unreachable_redis_fails_startup() {
    init_logging();

    let mut config = AppConfig::default();
    config.cache.url = "redis://127.0.0.1:1/0".to_string();
    config.cache.max_retries = 1;
    config.cache.connection_timeout = 1;

    assert!(initialize(&config).await.is_err());
}
