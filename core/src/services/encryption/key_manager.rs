//! Key material for token signing and secret encryption

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::{rngs::OsRng, RngCore};
use tracing::warn;

use idps_shared::config::AuthConfig;

use crate::errors::{CryptoError, DomainError, DomainResult};

/// AES-256 key length in bytes
pub const KEY_LENGTH: usize = 32;

/// Exactly 32 bytes of symmetric key material
///
/// Any other length is rejected when the key is built, never when it is used.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey([u8; KEY_LENGTH]);

impl CipherKey {
    /// Builds a key from raw bytes
    ///
    /// # Errors
    ///
    /// * `CryptoError::InvalidKeyLength` - `bytes` is not exactly 32 bytes long
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; KEY_LENGTH] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }

    /// Generates a fresh random key from the OS CSPRNG
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LENGTH];
        OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CipherKey(..)")
    }
}

impl TryFrom<&[u8]> for CipherKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for CipherKey {
    type Error = CryptoError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

/// Shared HMAC secret used to sign and verify tokens
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(..)")
    }
}

impl From<&str> for SigningSecret {
    fn from(secret: &str) -> Self {
        Self(secret.as_bytes().to_vec())
    }
}

impl From<String> for SigningSecret {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes())
    }
}

impl From<Vec<u8>> for SigningSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self(secret)
    }
}

/// Holds the signing secret and the symmetric cipher key
///
/// Read-only after construction; share it behind an `Arc` without locking.
#[derive(Clone)]
pub struct KeyManager {
    signing_secret: SigningSecret,
    cipher_key: CipherKey,
    /// HMAC key for signing tokens
    encoding_key: EncodingKey,
    /// HMAC key for verifying tokens
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("signing_secret", &self.signing_secret)
            .field("cipher_key", &self.cipher_key)
            .finish()
    }
}

impl KeyManager {
    /// Creates a key manager from a signing secret and a cipher key
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - the signing secret is empty
    pub fn new(signing_secret: impl Into<SigningSecret>, cipher_key: CipherKey) -> DomainResult<Self> {
        let signing_secret = signing_secret.into();
        if signing_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "Signing secret must not be empty".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(signing_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(signing_secret.as_bytes());

        Ok(Self {
            signing_secret,
            cipher_key,
            encoding_key,
            decoding_key,
        })
    }

    /// Creates a key manager from authentication configuration
    ///
    /// A missing encryption key is replaced with a freshly generated one; blobs
    /// sealed with it cannot be opened after a restart.
    ///
    /// # Errors
    ///
    /// * `CryptoError::InvalidKeyEncoding` / `CryptoError::InvalidKeyLength` - bad `ENCRYPTION_KEY`
    /// * `DomainError::Validation` - the signing secret is empty
    pub fn from_config(config: &AuthConfig) -> DomainResult<Self> {
        let cipher_key = match &config.encryption.key {
            Some(encoded) => Self::load_key(encoded)?,
            None => {
                warn!("No encryption key configured; generated an ephemeral key");
                CipherKey::generate()
            }
        };

        Self::new(config.jwt.secret.as_str(), cipher_key)
    }

    /// Returns `length` cryptographically random bytes
    pub fn generate_key(length: usize) -> Vec<u8> {
        let mut key = vec![0u8; length];
        OsRng.fill_bytes(&mut key);
        key
    }

    /// Decodes a base64 key
    ///
    /// # Errors
    ///
    /// * `CryptoError::InvalidKeyEncoding` - not valid base64
    /// * `CryptoError::InvalidKeyLength` - decoded length is not 32 bytes
    pub fn load_key(encoded: &str) -> Result<CipherKey, CryptoError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|_| CryptoError::InvalidKeyEncoding)?;
        CipherKey::from_bytes(&bytes)
    }

    /// Encodes a key as base64 text for environment or secret-store distribution
    pub fn export_key(key: &CipherKey) -> String {
        BASE64.encode(key.as_bytes())
    }

    pub fn cipher_key(&self) -> &CipherKey {
        &self.cipher_key
    }

    pub fn signing_secret(&self) -> &SigningSecret {
        &self.signing_secret
    }

    /// Returns the encoding key for signing tokens
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying tokens
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
