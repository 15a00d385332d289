//! Error types for playback management

use std::time::Duration;
use thiserror::Error;

/// Playback errors
///
/// Store methods never return these; they are logged and surfaced as
/// [`PlayerEvent::Error`](crate::PlayerEvent::Error). Engine adapters and
/// preference stores return them.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The engine refused or failed to start, load or seek
    #[error("Playback engine error: {0}")]
    Engine(String),

    /// No source is loaded into the engine
    #[error("No source loaded")]
    NoSourceLoaded,

    /// Seek target outside the loaded source
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(Duration),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
