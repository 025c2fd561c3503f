//! Business services containing domain logic and use cases.

pub mod auth;
pub mod encryption;
pub mod token;

// Re-export commonly used types
pub use auth::{extract_bearer, AuthGate};
pub use encryption::{AesGcmCipher, CipherKey, KeyManager};
pub use token::{TokenIssuer, TokenRevoker, TokenService, TokenServiceConfig, TokenVerifier};
