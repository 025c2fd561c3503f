//! # IDPS Core
//!
//! Core authentication and cryptography layer for the IDPS cloud services.
//! This crate contains the bearer token issuer, verifier and revoker, the
//! revocation store contract, AES-256-GCM encryption with its key manager,
//! and the error types shared by all of them.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, MockClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::{
    extract_bearer, AesGcmCipher, AuthGate, CipherKey, KeyManager, TokenIssuer, TokenRevoker,
    TokenService, TokenServiceConfig, TokenVerifier,
};
