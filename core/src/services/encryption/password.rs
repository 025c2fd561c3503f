//! Password hashing with bcrypt

use crate::errors::{DomainError, DomainResult};

pub use bcrypt::DEFAULT_COST;

/// Hash a password with the default bcrypt cost
pub fn hash_password(password: &str) -> DomainResult<String> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash a password with an explicit bcrypt cost (4..=31)
pub fn hash_password_with_cost(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a password against a bcrypt hash
///
/// # Errors
///
/// * `DomainError::Validation` - `hashed` is not a bcrypt hash
pub fn verify_password(password: &str, hashed: &str) -> DomainResult<bool> {
    bcrypt::verify(password, hashed).map_err(|e| DomainError::Validation {
        message: format!("Invalid password hash: {}", e),
    })
}
