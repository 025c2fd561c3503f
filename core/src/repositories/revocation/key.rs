//! Revocation key derivation

use idps_shared::config::RevocationKeyMode;

use crate::services::encryption::hash_sha256;

/// Prefix shared by every revocation entry
pub const REVOCATION_KEY_PREFIX: &str = "token:blacklist:";

/// Store key for `token`
///
/// `Raw` keeps the full token in the key, matching entries written by
/// earlier deployments; `Sha256` bounds key length.
pub fn revocation_key(token: &str, mode: RevocationKeyMode) -> String {
    match mode {
        RevocationKeyMode::Raw => format!("{}{}", REVOCATION_KEY_PREFIX, token),
        RevocationKeyMode::Sha256 => {
            format!("{}sha256:{}", REVOCATION_KEY_PREFIX, hash_sha256(token))
        }
    }
}
