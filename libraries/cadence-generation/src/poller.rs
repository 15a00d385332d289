//! Pending job poller
//!
//! Walks the pending tasks, asks the API for each record and writes finished
//! jobs back as success. Lookups that fail or come back incomplete leave the
//! task pending for the next pass; there is no retry limit.

use crate::client::GenerationApi;
use crate::error::{GenerationError, Result};
use crate::task::TaskFile;
use crate::types::{PollSummary, RecordStatus};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Pause between two passes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Pause before each record lookup
pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_millis(1000);

/// Resolves pending tasks against the generation API
pub struct Poller<A> {
    api: A,
    tasks: TaskFile,
    poll_interval: Duration,
    check_delay: Duration,
}

impl<A: GenerationApi> Poller<A> {
    pub fn new(api: A, tasks: TaskFile) -> Self {
        Self {
            api,
            tasks,
            poll_interval: DEFAULT_POLL_INTERVAL,
            check_delay: DEFAULT_CHECK_DELAY,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_check_delay(mut self, check_delay: Duration) -> Self {
        self.check_delay = check_delay;
        self
    }

    /// One pass over every pending task
    ///
    /// Each resolved task is written immediately, so an interrupted pass
    /// keeps what it already resolved. A track that fails validation leaves
    /// its task pending. Only task file errors abort the pass.
    pub async fn poll_once(&self) -> Result<PollSummary> {
        let pending = self.tasks.pending().await?;
        let total = pending.len();
        let mut summary = PollSummary::default();

        if total == 0 {
            debug!("No pending tasks");
            return Ok(summary);
        }

        info!(count = total, "Checking pending task statuses");

        for (index, task) in pending.iter().enumerate() {
            tokio::time::sleep(self.check_delay).await;
            debug!(task_id = %task.id, "Checking pending task {} of {}", index + 1, total);
            summary.checked += 1;

            match self.api.fetch_record(&task.id).await {
                Ok(RecordStatus::Ready(track)) => {
                    info!(
                        task_id = %task.id,
                        song_id = %task.song_id,
                        url = %track.url,
                        duration = track.duration,
                        "Generation finished"
                    );
                    match self.tasks.mark_success(task, track).await {
                        Ok(_) => summary.resolved += 1,
                        Err(GenerationError::InvalidTask(reason)) => {
                            warn!(task_id = %task.id, reason = %reason, "Rejected generated track");
                            summary.still_pending += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(RecordStatus::Incomplete(reason)) => {
                    debug!(task_id = %task.id, reason = %reason, "Task not ready");
                    summary.still_pending += 1;
                }
                Err(e) => {
                    warn!(task_id = %task.id, error = %e, "Failed to fetch task record");
                    summary.still_pending += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Poll until `shutdown` resolves
    ///
    /// A failed pass is logged and retried after the poll interval.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                result = self.poll_once() => match result {
                    Ok(summary) if summary.resolved > 0 => {
                        info!(resolved = summary.resolved, pending = summary.still_pending, "Poll pass complete");
                    }
                    Ok(_) => {}
                    Err(e) => error!(error = %e, "Poll pass failed"),
                },
            }

            tokio::select! {
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        info!("Poller stopped");
        Ok(())
    }
}
