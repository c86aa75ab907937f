//! Infrastructure adapters and runtime bootstrap.

pub mod assets;
pub mod bootstrap;
pub mod error;
pub mod http;
pub mod storage;
pub mod telemetry;
