//! Types for the generation API and task records.

use serde::{Deserialize, Serialize};

/// Default generation API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://apibox.erweima.ai";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "V4";

/// Default completion callback. The pipeline polls, so nothing listens here.
pub const DEFAULT_CALLBACK_URL: &str = "https://api.example.com/callback";

/// Generation API connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., `https://apibox.erweima.ai`)
    pub base_url: String,

    /// Bearer token
    pub api_key: String,

    /// Model sent with every submission
    pub model: String,

    /// Completion callback sent with every submission
    pub callback_url: String,
}

impl ClientConfig {
    /// Create settings with the default model and callback.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
        }
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the callback URL.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = callback_url.into();
        self
    }
}

/// One instrumental track to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Musical style (the song's genre)
    pub style: String,

    /// Track title
    pub title: String,
}

/// Wire body of a generation submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitBody<'a> {
    pub custom_mode: bool,
    pub instrumental: bool,
    pub style: &'a str,
    pub title: &'a str,
    pub model: &'a str,
    pub call_back_url: &'a str,
}

/// Audio produced by a finished job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTrack {
    /// Playable audio URL
    pub url: String,

    /// Duration in seconds
    pub duration: f64,

    /// Cover image URL
    pub image_url: String,
}

/// Outcome of a job status lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordStatus {
    /// Audio is available
    Ready(GeneratedTrack),

    /// Not finished yet, or the record lacks required fields
    Incomplete(String),
}

impl RecordStatus {
    /// Check if the job produced audio.
    pub fn is_ready(&self) -> bool {
        matches!(self, RecordStatus::Ready(_))
    }
}

/// Counts from one pass over the pending tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// Pending tasks looked up
    pub checked: usize,

    /// Tasks recorded as success in this pass
    pub resolved: usize,

    /// Tasks left pending
    pub still_pending: usize,
}
