mod revoker_tests;

use std::sync::Arc;

use crate::clock::MockClock;
use crate::repositories::revocation::{InMemoryRevocationStore, RevocationStore};
use crate::services::encryption::{CipherKey, KeyManager};

use super::{TokenService, TokenServiceConfig};

/// 2025-01-15T12:00:00Z
pub(super) const NOW: i64 = 1_736_942_400;

pub(super) struct Fixture {
    pub keys: Arc<KeyManager>,
    pub store: Arc<InMemoryRevocationStore>,
    pub clock: MockClock,
    pub service: TokenService,
}

pub(super) fn keys(secret: &str) -> Arc<KeyManager> {
    Arc::new(KeyManager::new(secret, CipherKey::generate()).unwrap())
}

pub(super) fn fixture() -> Fixture {
    fixture_with(TokenServiceConfig::default())
}

pub(super) fn fixture_with(config: TokenServiceConfig) -> Fixture {
    let keys = keys("test-signing-secret");
    let clock = MockClock::at_unix(NOW);
    let store = Arc::new(InMemoryRevocationStore::with_clock(Arc::new(clock.clone())));
    let service = TokenService::with_clock(
        keys.clone(),
        store.clone() as Arc<dyn RevocationStore>,
        config,
        Arc::new(clock.clone()),
    );

    Fixture {
        keys,
        store,
        clock,
        service,
    }
}
