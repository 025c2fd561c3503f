//! Error types for token authentication and authenticated encryption
//!
//! Token errors separate logical rejections (expired, invalid, revoked) from
//! transport failures against the revocation store, so callers can choose
//! between rejecting the request and retrying.

use thiserror::Error;

/// Token issuance, verification and revocation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {reason}")]
    TokenInvalid { reason: String },

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Revocation store unavailable: {message}")]
    RevocationStoreUnavailable { message: String },

    #[error("Invalid claims: {message}")]
    InvalidClaims { message: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing authorization header")]
    MissingAuthorization,

    #[error("Invalid authorization header")]
    InvalidAuthorizationHeader,
}

impl TokenError {
    /// Create a `TokenInvalid` error from any displayable reason
    pub fn invalid(reason: impl std::fmt::Display) -> Self {
        TokenError::TokenInvalid {
            reason: reason.to_string(),
        }
    }

    /// Create a `RevocationStoreUnavailable` error from any displayable cause
    pub fn store_unavailable(message: impl std::fmt::Display) -> Self {
        TokenError::RevocationStoreUnavailable {
            message: message.to_string(),
        }
    }

    /// Whether this is a logical rejection of the presented credentials
    ///
    /// These are never fixed by retrying with the same token.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            TokenError::TokenExpired
                | TokenError::TokenInvalid { .. }
                | TokenError::TokenRevoked
                | TokenError::MissingAuthorization
                | TokenError::InvalidAuthorizationHeader
        )
    }

    /// Whether the failure came from the revocation store rather than the token
    pub fn is_transient(&self) -> bool {
        matches!(self, TokenError::RevocationStoreUnavailable { .. })
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenInvalid { .. } => "TOKEN_INVALID",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::RevocationStoreUnavailable { .. } => "REVOCATION_STORE_UNAVAILABLE",
            TokenError::InvalidClaims { .. } => "INVALID_CLAIMS",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::MissingAuthorization => "MISSING_AUTHORIZATION",
            TokenError::InvalidAuthorizationHeader => "INVALID_AUTHORIZATION_HEADER",
        }
    }
}

/// Key material and AEAD errors
///
/// `DecryptionFailed` deliberately carries no cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Key is not valid base64")]
    InvalidKeyEncoding,

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed")]
    DecryptionFailed,
}
