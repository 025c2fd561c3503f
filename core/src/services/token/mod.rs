//! Token service module for bearer token management
//!
//! This module handles all token-related operations including:
//! - Signing claim sets into tokens with an injected lifetime
//! - Verifying tokens against the revocation list, signature and expiry
//! - Recording revocations that outlive the token they cover

mod config;
mod issuer;
mod revoker;
mod service;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::{parse_hmac_algorithm, TokenServiceConfig, DEFAULT_TOKEN_TTL_SECONDS};
pub use issuer::TokenIssuer;
pub use revoker::TokenRevoker;
pub use service::TokenService;
pub use verifier::TokenVerifier;

use crate::errors::{DomainError, TokenError};

/// Normalizes a store error into `RevocationStoreUnavailable`
pub(crate) fn store_failure(error: DomainError) -> TokenError {
    match error {
        DomainError::Token(e @ TokenError::RevocationStoreUnavailable { .. }) => e,
        other => TokenError::store_unavailable(other),
    }
}
