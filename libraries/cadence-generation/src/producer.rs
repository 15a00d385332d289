//! Job submission.

use crate::client::GenerationApi;
use crate::error::{GenerationError, Result};
use crate::task::{Task, TaskFile};
use crate::types::GenerationRequest;
use cadence_core::SongId;
use tracing::info;
use uuid::Uuid;

/// Submits generation jobs and records them as pending.
pub struct Producer<A> {
    api: A,
    tasks: TaskFile,
}

impl<A: GenerationApi> Producer<A> {
    /// Create a producer writing to `tasks`.
    pub fn new(api: A, tasks: TaskFile) -> Self {
        Self { api, tasks }
    }

    /// Start an instrumental job for `song_id` in `genre`.
    ///
    /// Without a `title` one is derived from the genre. The pending record is
    /// only written once the API has accepted the job.
    pub async fn generate(
        &self,
        song_id: &SongId,
        genre: &str,
        title: Option<&str>,
    ) -> Result<Task> {
        if song_id.is_empty() {
            return Err(GenerationError::InvalidTask("empty song id".into()));
        }

        let request = GenerationRequest {
            style: genre.to_string(),
            title: title.map_or_else(|| derive_title(genre), str::to_string),
        };

        let task_id = self.api.submit(&request).await?;
        let task = self.tasks.append_pending(&task_id, song_id).await?;

        info!(task_id = %task.id, song_id = %song_id, title = %request.title, "Recorded pending task");
        Ok(task)
    }
}

/// Title for a job submitted without one, e.g. `Synthwave Session 3f9a1c`.
pub fn derive_title(genre: &str) -> String {
    let genre = genre.trim();
    let mut chars = genre.chars();
    let genre: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Untitled".to_string(),
    };

    let suffix = Uuid::new_v4().simple().to_string();
    format!("{} Session {}", genre, &suffix[..6])
}
