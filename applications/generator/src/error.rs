//! Generator error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Failures surfaced before the pipeline starts
///
/// Pipeline errors stay `GenerationError` and reach `main` through `anyhow`.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(String),
}
