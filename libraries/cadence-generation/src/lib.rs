//! Cadence Generation
//!
//! Offline pipeline that produces audio for catalog songs through a
//! text-to-music API.
//!
//! # Features
//!
//! - **Producer**: submit a job for a song and record it as pending
//! - **Poller**: look up pending jobs and record finished audio
//! - **Task file**: JSON job list shared by both sides
//!
//! # Example
//!
//! ```ignore
//! use cadence_core::SongId;
//! use cadence_generation::{ClientConfig, GenerationClient, Poller, Producer, TaskFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://apibox.erweima.ai", "api-key");
//!     let tasks = TaskFile::new("./tasks.json");
//!
//!     let producer = Producer::new(GenerationClient::new(config.clone())?, tasks.clone());
//!     producer.generate(&SongId::new("song-1"), "Synthwave", None).await?;
//!
//!     let poller = Poller::new(GenerationClient::new(config)?, tasks);
//!     poller.run(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod poller;
mod producer;
mod task;
mod types;

// Re-export main types
pub use client::{GenerationApi, GenerationClient};
pub use error::{GenerationError, Result};
pub use poller::{Poller, DEFAULT_CHECK_DELAY, DEFAULT_POLL_INTERVAL};
pub use producer::{derive_title, Producer};
pub use task::{Task, TaskFile, TaskState};
pub use types::{
    ClientConfig, GeneratedTrack, GenerationRequest, PollSummary, RecordStatus, DEFAULT_BASE_URL,
    DEFAULT_CALLBACK_URL, DEFAULT_MODEL,
};
