//! Cadence Generator Library
//!
//! Configuration and error types for the `cadence-generator` command.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
