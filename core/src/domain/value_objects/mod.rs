//! Value objects representing immutable domain concepts.

pub mod auth_outcome;
pub mod encrypted_blob;

// Re-export commonly used types
pub use auth_outcome::AuthOutcome;
pub use encrypted_blob::EncryptedBlob;
