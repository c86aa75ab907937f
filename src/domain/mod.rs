//! Domain layer types and invariants.

pub mod api_keys;
pub mod error;
pub mod posts;
