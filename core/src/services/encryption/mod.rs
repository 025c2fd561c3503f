//! Key management, authenticated encryption and hashing helpers

pub mod aead;
pub mod hashing;
pub mod key_manager;
pub mod password;

// Re-export main types
pub use aead::{AesGcmCipher, NONCE_LENGTH, TAG_LENGTH};
pub use hashing::{hash_sha256, hmac_sha256, token_fingerprint, verify_hmac_sha256};
pub use key_manager::{CipherKey, KeyManager, SigningSecret, KEY_LENGTH};
pub use password::{hash_password, hash_password_with_cost, verify_password};
