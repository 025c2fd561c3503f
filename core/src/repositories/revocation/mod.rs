pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod key;
pub mod memory;

pub use key::{revocation_key, REVOCATION_KEY_PREFIX};
pub use memory::InMemoryRevocationStore;
pub use r#trait::RevocationStore;
