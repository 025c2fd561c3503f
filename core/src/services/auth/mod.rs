//! Request authentication module
//!
//! Bearer header parsing and the authenticate-then-dispatch gate that guards
//! protected operations.

mod gate;

#[cfg(test)]
mod tests;

pub use gate::{extract_bearer, AuthGate, BEARER_SCHEME};
