//! SHA-256 and HMAC-SHA-256 helpers

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded SHA-256 of `data`
pub fn hash_sha256(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// Hex-encoded HMAC-SHA-256 of `data` under `key`
///
/// # Errors
///
/// * `DomainError::Internal` - the MAC rejected the key
pub fn hmac_sha256(key: &str, data: &str) -> DomainResult<String> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|e| DomainError::Internal {
        message: format!("HMAC key rejected: {}", e),
    })?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a lowercase hex HMAC-SHA-256 signature in constant time
///
/// The comparison is exact: uppercase hex is rejected.
pub fn verify_hmac_sha256(key: &str, data: &str, signature: &str) -> bool {
    hmac_sha256(key, data)
        .map(|expected| constant_time_eq(expected.as_bytes(), signature.as_bytes()))
        .unwrap_or(false)
}

/// Short, non-reversible token identifier safe to put in logs
pub fn token_fingerprint(token: &str) -> String {
    let digest = hash_sha256(token);
    digest[..16].to_string()
}
