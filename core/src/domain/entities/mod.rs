//! Domain entities representing core business objects.

pub mod token;


// Re-export commonly used types
pub use token::{ClaimSet, Claims, CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, RESERVED_CLAIMS};
