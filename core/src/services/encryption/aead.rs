//! Authenticated encryption of stored secrets using AES-256-GCM
//!
//! Blob layout is `base64(nonce[12] || ciphertext || tag[16])`. Existing
//! persisted blobs depend on this exact construction.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;

use crate::domain::value_objects::EncryptedBlob;
use crate::errors::CryptoError;

use super::key_manager::{CipherKey, KeyManager};

/// AES-GCM nonce length in bytes
pub const NONCE_LENGTH: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_LENGTH: usize = 16;

/// AES-256-GCM cipher over byte payloads with optional associated data
///
/// Stateless apart from the key; safe to share across tasks.
#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
    key: CipherKey,
}

impl std::fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmCipher").field("key", &self.key).finish()
    }
}

impl AesGcmCipher {
    /// Create a cipher bound to `key`
    pub fn new(key: CipherKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher, key }
    }

    /// Create a cipher with a freshly generated key
    pub fn generate() -> Self {
        Self::new(CipherKey::generate())
    }

    /// Create a cipher from raw key bytes
    ///
    /// # Errors
    ///
    /// * `CryptoError::InvalidKeyLength` - key is not exactly 32 bytes
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self::new(CipherKey::from_bytes(key)?))
    }

    /// Create a cipher from a base64-encoded key
    pub fn from_base64_key(encoded: &str) -> Result<Self, CryptoError> {
        Ok(Self::new(KeyManager::load_key(encoded)?))
    }

    /// Create a cipher using the key manager's symmetric key
    pub fn from_key_manager(keys: &KeyManager) -> Self {
        Self::new(keys.cipher_key().clone())
    }

    /// Base64 form of the key, for distribution
    pub fn key_base64(&self) -> String {
        KeyManager::export_key(&self.key)
    }

    /// Generate a random nonce for AES-GCM
    fn generate_nonce() -> [u8; NONCE_LENGTH] {
        let mut nonce = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    /// Encrypt `plaintext`, binding `associated_data` into the tag
    ///
    /// Every call draws a new random nonce. Absent and empty associated data
    /// are equivalent.
    ///
    /// # Errors
    ///
    /// * `CryptoError::EncryptionFailed` - plaintext exceeds the AES-GCM length limit
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<EncryptedBlob, CryptoError> {
        let nonce = Self::generate_nonce();
        let payload = Payload {
            msg: plaintext,
            aad: associated_data.unwrap_or_default(),
        };

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), payload)
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);

        Ok(EncryptedBlob::new(BASE64.encode(combined)))
    }

    /// Decrypt a blob produced by [`encrypt`](Self::encrypt)
    ///
    /// # Errors
    ///
    /// * `CryptoError::DecryptionFailed` - malformed encoding, truncated blob,
    ///   wrong key, tampering or mismatched associated data; the cause is not reported
    pub fn decrypt(
        &self,
        blob: impl AsRef<str>,
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let combined = BASE64
            .decode(blob.as_ref().trim())
            .map_err(|_| CryptoError::DecryptionFailed)?;

        if combined.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(CryptoError::DecryptionFailed);
        }

        let (nonce, ciphertext) = combined.split_at(NONCE_LENGTH);
        let payload = Payload {
            msg: ciphertext,
            aad: associated_data.unwrap_or_default(),
        };

        self.cipher
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|_| {
                debug!("Blob failed authentication");
                CryptoError::DecryptionFailed
            })
    }

    /// Encrypt UTF-8 text
    pub fn encrypt_str(
        &self,
        plaintext: &str,
        associated_data: Option<&str>,
    ) -> Result<EncryptedBlob, CryptoError> {
        self.encrypt(plaintext.as_bytes(), associated_data.map(str::as_bytes))
    }

    /// Decrypt to UTF-8 text; non-UTF-8 plaintext is reported as `DecryptionFailed`
    pub fn decrypt_str(
        &self,
        blob: impl AsRef<str>,
        associated_data: Option<&str>,
    ) -> Result<String, CryptoError> {
        let plaintext = self.decrypt(blob, associated_data.map(str::as_bytes))?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
    }
}
