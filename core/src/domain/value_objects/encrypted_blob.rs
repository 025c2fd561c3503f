//! Text-encoded AEAD output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base64 of `nonce (12 bytes) || ciphertext || tag (16 bytes)`
///
/// Safe to store in text columns or embed in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    /// Wraps an already-encoded blob, e.g. one read back from storage
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncryptedBlob {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl From<&str> for EncryptedBlob {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_string())
    }
}

impl AsRef<str> for EncryptedBlob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
