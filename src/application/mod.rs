//! Application services: post lifecycle orchestration, API key handling and
//! the repository seams they depend on.

pub mod api_keys;
pub mod error;
pub mod posts;
pub mod render;
pub mod repos;
