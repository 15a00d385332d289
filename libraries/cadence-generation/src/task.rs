//! Task file shared by the producer and the poller
//!
//! A JSON array of job records:
//!
//! ```json
//! [
//!   { "id": "task-1", "songId": "song-1", "state": { "state": "pending" } },
//!   {
//!     "id": "task-2",
//!     "songId": "song-2",
//!     "state": {
//!       "state": "success",
//!       "data": { "url": "https://...", "duration": 182.4, "imageUrl": "https://..." }
//!     }
//!   }
//! ]
//! ```
//!
//! Writes go to a sibling temp file which is then renamed over the target, so
//! a reader never sees a torn file. There is no locking: two writers racing on
//! the same file keep whichever rename lands last.

use crate::error::{GenerationError, Result};
use crate::types::GeneratedTrack;
use cadence_core::SongId;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Job lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TaskState {
    /// Submitted, audio not yet available
    Pending,

    /// Audio available
    Success {
        /// Generated audio
        data: GeneratedTrack,
    },
}

/// One generation job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Job id assigned by the generation API
    pub id: String,

    /// Catalog song the audio is for
    pub song_id: SongId,

    /// Lifecycle state
    pub state: TaskState,
}

impl Task {
    /// New pending task
    pub fn pending(id: impl Into<String>, song_id: SongId) -> Self {
        Self {
            id: id.into(),
            song_id,
            state: TaskState::Pending,
        }
    }

    /// Check if still waiting for audio
    pub fn is_pending(&self) -> bool {
        self.state == TaskState::Pending
    }

    /// Check the record against the task schema
    ///
    /// Ids must be non-empty and success URLs absolute.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(GenerationError::InvalidTask("empty task id".into()));
        }
        if self.song_id.is_empty() {
            return Err(GenerationError::InvalidTask(format!(
                "task {} has an empty song id",
                self.id
            )));
        }

        if let TaskState::Success { data } = &self.state {
            for (field, value) in [("url", &data.url), ("imageUrl", &data.image_url)] {
                Url::parse(value).map_err(|e| {
                    GenerationError::InvalidTask(format!(
                        "task {} has an invalid {}: {}",
                        self.id, field, e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

/// JSON task list on disk
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    /// Task file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this task list
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all tasks
    ///
    /// A missing file is an empty list. A file that does not parse or holds
    /// an invalid record is an error and is left untouched.
    pub async fn load(&self) -> Result<Vec<Task>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Task file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let tasks: Vec<Task> =
            serde_json::from_str(&contents).map_err(|source| GenerationError::MalformedTaskFile {
                path: self.path.clone(),
                source,
            })?;

        for task in &tasks {
            task.validate()?;
        }

        Ok(tasks)
    }

    /// Replace the whole list
    pub async fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), count = tasks.len(), "Saved task file");
        Ok(())
    }

    /// Record a freshly submitted job
    pub async fn append_pending(&self, task_id: &str, song_id: &SongId) -> Result<Task> {
        let task = Task::pending(task_id, song_id.clone());
        task.validate()?;

        let mut tasks = self.load().await?;
        tasks.push(task.clone());
        self.save(&tasks).await?;

        Ok(task)
    }

    /// Record a finished job
    ///
    /// Re-reads the file first so entries appended meanwhile are kept. The
    /// entry with the same id is replaced in place; if it was removed in the
    /// meantime the finished record is appended.
    pub async fn mark_success(&self, task: &Task, data: GeneratedTrack) -> Result<Task> {
        let finished = Task {
            id: task.id.clone(),
            song_id: task.song_id.clone(),
            state: TaskState::Success { data },
        };
        finished.validate()?;

        let mut tasks = self.load().await?;
        match tasks.iter_mut().find(|t| t.id == finished.id) {
            Some(existing) => *existing = finished.clone(),
            None => tasks.push(finished.clone()),
        }

        self.save(&tasks).await?;
        Ok(finished)
    }

    /// Tasks still waiting for audio
    pub async fn pending(&self) -> Result<Vec<Task>> {
        let tasks = self.load().await?;
        Ok(tasks.into_iter().filter(Task::is_pending).collect())
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
