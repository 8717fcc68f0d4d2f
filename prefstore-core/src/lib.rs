//! prefstore-core: configuration and shared error types
//!
//! Everything needed to bootstrap a prefstore process: environment-driven
//! configuration with documented defaults and the startup error taxonomy.

pub mod config;
pub mod error;

pub use config::{Config, DbConfig};
pub use error::ConfigError;
