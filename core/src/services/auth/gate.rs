//! Authenticate-then-dispatch gate for protected operations

use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::token::Claims;
use crate::domain::value_objects::AuthOutcome;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::token::TokenVerifier;

/// Authorization scheme accepted by the gate
pub const BEARER_SCHEME: &str = "Bearer";

/// Extracts the token from an `Authorization` header value
///
/// The value must be exactly two whitespace-separated parts: the scheme,
/// matched case-insensitively, then the token.
///
/// # Errors
///
/// * `TokenError::InvalidAuthorizationHeader` - wrong scheme or wrong number of parts
pub fn extract_bearer(header: &str) -> Result<&str, TokenError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => Ok(token),
        _ => Err(TokenError::InvalidAuthorizationHeader),
    }
}

/// Verifies bearer credentials before a protected operation runs
///
/// The gate is the only place a transport layer needs to call: the handler
/// receives verified claims, or never runs.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Verifies the credentials carried by an `Authorization` header value
    ///
    /// # Arguments
    ///
    /// * `header` - The header value, or `None` when the request has none
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Verified claims
    /// * `Err(TokenError::MissingAuthorization)` - No header
    /// * `Err(TokenError::InvalidAuthorizationHeader)` - Not a bearer header
    /// * Any error from [`TokenVerifier::verify`]
    pub async fn authenticate(&self, header: Option<&str>) -> DomainResult<Claims> {
        let header = header.ok_or(TokenError::MissingAuthorization)?;
        let token = extract_bearer(header)?;
        self.verifier.verify(token).await
    }

    /// Like [`authenticate`](Self::authenticate), but rejected credentials
    /// yield `Anonymous` instead of an error
    ///
    /// Store outages still surface as errors; an unreachable revocation list
    /// is not the same as an anonymous caller.
    pub async fn authenticate_optional(&self, header: Option<&str>) -> DomainResult<AuthOutcome> {
        match self.authenticate(header).await {
            Ok(claims) => Ok(AuthOutcome::Authenticated(claims)),
            Err(DomainError::Token(e)) if e.is_authentication_failure() => {
                debug!(reason = e.code(), "Proceeding anonymously");
                Ok(AuthOutcome::Anonymous)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs `handler` with verified claims, or returns the authentication error
    /// without running it
    pub async fn dispatch<F, Fut, T>(&self, header: Option<&str>, handler: F) -> DomainResult<T>
    where
        F: FnOnce(Claims) -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        let claims = self.authenticate(header).await?;
        handler(claims).await
    }

    /// Runs `handler` for authenticated and anonymous callers alike
    pub async fn dispatch_optional<F, Fut, T>(
        &self,
        header: Option<&str>,
        handler: F,
    ) -> DomainResult<T>
    where
        F: FnOnce(AuthOutcome) -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        let outcome = self.authenticate_optional(header).await?;
        handler(outcome).await
    }
}
