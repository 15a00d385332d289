//! Error types for the generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while submitting, polling or recording generation jobs.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// API answered with an unexpected body
    #[error("Invalid response from generation API: {0}")]
    InvalidResponse(String),

    /// Invalid API base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Task file exists but is not a valid task list
    #[error("Malformed task file {}: {source}", path.display())]
    MalformedTaskFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A task entry violates the task schema
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    /// IO error on the task file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while writing the task file
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerationError>;
