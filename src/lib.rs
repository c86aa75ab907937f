//! A small blog server: Markdown posts uploaded over an API-key-gated HTTP
//! surface, rendered once to HTML and served from disk.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
