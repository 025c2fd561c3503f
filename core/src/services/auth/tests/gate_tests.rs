use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use idps_shared::config::RevocationFailurePolicy;

use crate::clock::MockClock;
use crate::domain::entities::token::ClaimSet;
use crate::domain::value_objects::AuthOutcome;
use crate::errors::{DomainError, TokenError};
use crate::repositories::revocation::{InMemoryRevocationStore, RevocationStore};
use crate::services::auth::{extract_bearer, AuthGate};
use crate::services::encryption::{CipherKey, KeyManager};
use crate::services::token::{TokenService, TokenServiceConfig, TokenVerifier};

struct DownStore;

#[async_trait::async_trait]
impl RevocationStore for DownStore {
    async fn put(&self, _key: &str, _ttl_seconds: u64) -> crate::errors::DomainResult<()> {
        Err(TokenError::store_unavailable("down").into())
    }

    async fn exists(&self, _key: &str) -> crate::errors::DomainResult<bool> {
        Err(TokenError::store_unavailable("down").into())
    }
}

fn setup() -> (TokenService, AuthGate, MockClock) {
    let keys = Arc::new(KeyManager::new("gate-secret", CipherKey::generate()).unwrap());
    let clock = MockClock::at_unix(1_736_942_400);
    let store = Arc::new(InMemoryRevocationStore::with_clock(Arc::new(clock.clone())));
    let service = TokenService::with_clock(
        keys,
        store,
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    );
    let gate = AuthGate::new(service.verifier());
    (service, gate, clock)
}

#[test]
fn test_extract_bearer() {
    assert_eq!(extract_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
    assert_eq!(extract_bearer("bearer abc"), Ok("abc"));
    assert_eq!(extract_bearer("BEARER   abc"), Ok("abc"));

    for header in ["", "Bearer", "Basic abc", "Bearer a b", "Token abc", "abc"] {
        assert_eq!(
            extract_bearer(header),
            Err(TokenError::InvalidAuthorizationHeader),
            "{:?}",
            header
        );
    }
}

#[tokio::test]
async fn test_authenticate() {
    let (service, gate, _) = setup();
    let token = service
        .issue(&ClaimSet::new().with("subject", "car-123"), Some(60))
        .unwrap();

    let claims = gate
        .authenticate(Some(&format!("Bearer {}", token)))
        .await
        .unwrap();
    assert_eq!(claims.subject(), Some("car-123"));

    assert!(matches!(
        gate.authenticate(None).await,
        Err(DomainError::Token(TokenError::MissingAuthorization))
    ));
    assert!(matches!(
        gate.authenticate(Some(&format!("Basic {}", token))).await,
        Err(DomainError::Token(TokenError::InvalidAuthorizationHeader))
    ));
}

#[tokio::test]
async fn test_dispatch_runs_handler_only_when_authenticated() {
    let (service, gate, clock) = setup();
    let token = service
        .issue(&ClaimSet::new().with("vin", "WVW123"), Some(60))
        .unwrap();
    let header = format!("Bearer {}", token);

    let vin = gate
        .dispatch(Some(&header), |claims| async move {
            Ok(claims.vin().map(str::to_string))
        })
        .await
        .unwrap();
    assert_eq!(vin.as_deref(), Some("WVW123"));

    clock.advance_secs(60);
    let ran = AtomicBool::new(false);
    let result = gate
        .dispatch(Some(&header), |_| async {
            ran.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_dispatch_rejects_revoked_token() {
    let (service, gate, _) = setup();
    let token = service.issue(&ClaimSet::new(), Some(60)).unwrap();
    service.revoke(&token, None).await.unwrap();

    let result = gate
        .dispatch(Some(&format!("Bearer {}", token)), |_| async { Ok(()) })
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_authenticate_optional() {
    let (service, gate, _) = setup();
    let token = service.issue(&ClaimSet::new(), Some(60)).unwrap();

    let outcome = gate
        .authenticate_optional(Some(&format!("Bearer {}", token)))
        .await
        .unwrap();
    assert!(outcome.is_authenticated());

    assert_eq!(gate.authenticate_optional(None).await.unwrap(), AuthOutcome::Anonymous);
    assert_eq!(
        gate.authenticate_optional(Some("Bearer not-a-token"))
            .await
            .unwrap(),
        AuthOutcome::Anonymous
    );

    let answer = gate
        .dispatch_optional(None, |outcome| async move { Ok(outcome.is_authenticated()) })
        .await
        .unwrap();
    assert!(!answer);
}

#[tokio::test]
async fn test_authenticate_optional_surfaces_store_outage() {
    let keys = Arc::new(KeyManager::new("gate-secret", CipherKey::generate()).unwrap());
    let verifier = TokenVerifier::new(keys.clone(), Arc::new(DownStore), TokenServiceConfig::default());
    let gate = AuthGate::new(Arc::new(verifier));

    let result = gate.authenticate_optional(Some("Bearer anything")).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RevocationStoreUnavailable { .. }))
    ));

    let lenient = AuthGate::new(Arc::new(TokenVerifier::new(
        keys,
        Arc::new(DownStore),
        TokenServiceConfig {
            failure_policy: RevocationFailurePolicy::FailOpen,
            ..Default::default()
        },
    )));
    assert_eq!(
        lenient
            .authenticate_optional(Some("Bearer anything"))
            .await
            .unwrap(),
        AuthOutcome::Anonymous
    );
}
