use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use idps_shared::config::RevocationKeyMode;

use crate::domain::entities::token::ClaimSet;
use crate::errors::{DomainError, TokenError};
use crate::repositories::revocation::revocation_key;
use crate::services::token::{TokenRevoker, TokenServiceConfig};

use super::mocks::{FailingStore, SlowStore};
use super::{fixture, fixture_with};

fn key(token: &str) -> String {
    revocation_key(token, RevocationKeyMode::Raw)
}

#[tokio::test]
async fn test_vehicle_token_lifecycle() {
    let fx = fixture();
    let token = fx
        .service
        .issue(&ClaimSet::new().with("subject", "car-123"), Some(3600))
        .unwrap();

    let claims = fx.service.verify(&token).await.unwrap();
    assert_eq!(claims.subject(), Some("car-123"));

    fx.service.revoke(&token, None).await.unwrap();
    assert!(matches!(
        fx.service.verify(&token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_revocation_ttl_covers_remaining_lifetime() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(3600)).unwrap();

    fx.clock.advance_secs(600);
    fx.service.revoke(&token, None).await.unwrap();
    assert_eq!(fx.store.ttl(&key(&token)).await, Some(3000));
}

#[tokio::test]
async fn test_short_explicit_ttl_is_raised() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(3600)).unwrap();

    fx.service.revoke(&token, Some(10)).await.unwrap();
    assert_eq!(fx.store.ttl(&key(&token)).await, Some(3600));

    // The entry outlives the explicit TTL and the token is still rejected
    fx.clock.advance_secs(11);
    assert!(matches!(
        fx.service.verify(&token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_long_explicit_ttl_is_kept() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(60)).unwrap();

    fx.service.revoke(&token, Some(7200)).await.unwrap();
    assert_eq!(fx.store.ttl(&key(&token)).await, Some(7200));
}

#[tokio::test]
async fn test_undecodable_token_uses_default_ttl() {
    let fx = fixture_with(TokenServiceConfig {
        default_ttl_seconds: 900,
        ..Default::default()
    });

    fx.service.revoke("garbage", None).await.unwrap();
    assert_eq!(fx.store.ttl(&key("garbage")).await, Some(900));

    fx.service.revoke("other-garbage", Some(42)).await.unwrap();
    assert_eq!(fx.store.ttl(&key("other-garbage")).await, Some(42));
}

#[tokio::test]
async fn test_expired_token_records_nothing() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(60)).unwrap();

    fx.clock.advance_secs(120);
    fx.service.revoke(&token, None).await.unwrap();
    assert!(fx.store.is_empty().await);
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(3600)).unwrap();

    fx.service.revoke(&token, None).await.unwrap();
    fx.service.revoke(&token, None).await.unwrap();

    assert_eq!(fx.store.len().await, 1);
    assert!(matches!(
        fx.service.verify(&token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_second_revoke_never_shortens_first() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(3600)).unwrap();

    fx.service.revoke(&token, None).await.unwrap();

    fx.clock.advance_secs(600);
    fx.service.revoke(&token, Some(10)).await.unwrap();
    assert_eq!(fx.store.ttl(&key(&token)).await, Some(3000));

    fx.clock.advance_secs(11);
    assert!(matches!(
        fx.service.verify(&token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_revoke_accepts_foreign_signatures() {
    let fx = fixture();
    let foreign = super::keys("another-secret");
    let other = crate::services::token::TokenIssuer::with_clock(
        foreign,
        TokenServiceConfig::default(),
        Arc::new(fx.clock.clone()),
    );
    let token = other.issue(&ClaimSet::new(), Some(120)).unwrap();

    fx.service.revoke(&token, None).await.unwrap();
    assert_eq!(fx.store.ttl(&key(&token)).await, Some(120));
}

#[tokio::test]
async fn test_hashed_key_mode() {
    let fx = fixture_with(TokenServiceConfig {
        key_mode: RevocationKeyMode::Sha256,
        ..Default::default()
    });
    let token = fx.service.issue(&ClaimSet::new(), Some(60)).unwrap();

    fx.service.revoke(&token, None).await.unwrap();
    assert!(fx.store.ttl(&key(&token)).await.is_none());
    assert_eq!(
        fx.store
            .ttl(&revocation_key(&token, RevocationKeyMode::Sha256))
            .await,
        Some(60)
    );
}

#[tokio::test]
async fn test_revoke_surfaces_store_failure() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(60)).unwrap();

    let store = Arc::new(FailingStore::default());
    let revoker = TokenRevoker::with_clock(
        fx.keys.clone(),
        store.clone(),
        TokenServiceConfig::default(),
        Arc::new(fx.clock.clone()),
    );

    let result = revoker.revoke(&token, None).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RevocationStoreUnavailable { ref message }))
            if message == "connection refused"
    ));
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_revoke_bounded_by_store_timeout() {
    let fx = fixture();
    let token = fx.service.issue(&ClaimSet::new(), Some(60)).unwrap();

    let revoker = TokenRevoker::with_clock(
        fx.keys.clone(),
        Arc::new(SlowStore {
            delay: Duration::from_secs(30),
        }),
        TokenServiceConfig {
            store_timeout: Duration::from_millis(100),
            ..Default::default()
        },
        Arc::new(fx.clock.clone()),
    );

    assert!(matches!(
        revoker.revoke(&token, None).await,
        Err(DomainError::Token(TokenError::RevocationStoreUnavailable { .. }))
    ));
}
