//! Storage seams used by the token services.

pub mod revocation;

pub use revocation::{revocation_key, InMemoryRevocationStore, RevocationStore, REVOCATION_KEY_PREFIX};
