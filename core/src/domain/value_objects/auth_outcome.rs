//! Result of an optional authentication step.

use crate::domain::entities::Claims;

/// Either verified claims or an explicitly anonymous caller
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// A valid, unrevoked, unexpired token was presented
    Authenticated(Claims),
    /// No usable credentials were presented
    Anonymous,
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// Borrow the claims when authenticated
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            AuthOutcome::Authenticated(claims) => Some(claims),
            AuthOutcome::Anonymous => None,
        }
    }

    pub fn into_claims(self) -> Option<Claims> {
        match self {
            AuthOutcome::Authenticated(claims) => Some(claims),
            AuthOutcome::Anonymous => None,
        }
    }
}
