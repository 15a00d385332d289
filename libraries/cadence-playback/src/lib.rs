//! Cadence - Playback Queue
//!
//! Platform-agnostic play queue state machine for Cadence.
//!
//! This crate provides:
//! - Play queue with an unshuffled snapshot for shuffle restore
//! - Shuffle that keeps the current song playing
//! - Repeat modes (Off, All, One)
//! - Volume and mute
//! - Seek and the "restart if past 3 seconds" previous behavior
//! - Persisted preferences (volume, mute, repeat, shuffle)
//!
//! # Architecture
//!
//! The crate never touches audio itself. The platform shell supplies a
//! [`PlaybackEngine`] (one media handle), forwards its signals as
//! [`EngineEvent`]s, and drains [`PlayerEvent`]s to refresh the UI.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{ArtistSummary, Song, SongId};
//! use cadence_playback::{
//!     MemoryPreferenceStore, PlaybackEngine, PlayerStore, RepeatMode, Result,
//! };
//! use std::time::Duration;
//!
//! struct NullEngine;
//!
//! impl PlaybackEngine for NullEngine {
//!     fn load(&mut self, _source: &str) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//! }
//!
//! let artist = ArtistSummary::new("artist-1", "The Examples");
//! let songs: Vec<Song> = ["a", "b", "c"]
//!     .iter()
//!     .map(|id| {
//!         Song::new(
//!             SongId::new(*id),
//!             format!("Song {id}"),
//!             Duration::from_secs(180),
//!             format!("https://cdn.example.com/{id}.mp3"),
//!             artist.clone(),
//!         )
//!     })
//!     .collect();
//!
//! let mut store = PlayerStore::new(NullEngine, Box::new(MemoryPreferenceStore::new()));
//! store.play_song(songs[1].clone(), songs.clone());
//! assert_eq!(store.queue_index(), Some(1));
//! assert!(store.is_playing());
//!
//! store.toggle_repeat_mode();
//! assert_eq!(store.repeat_mode(), RepeatMode::All);
//!
//! store.next_song();
//! store.next_song();
//! assert_eq!(store.queue_index(), Some(0));
//! ```

mod engine;
mod error;
mod events;
mod preferences;
mod queue;
mod shuffle;
mod store;
pub mod types;
mod volume;

// Public exports
pub use engine::{EngineEvent, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use preferences::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore, DEFAULT_NAMESPACE};
pub use queue::{Queue, Removal};
pub use shuffle::shuffle_pinned;
pub use store::PlayerStore;
pub use types::{EntryId, PlayerPreferences, QueueEntry, RepeatMode, DEFAULT_VOLUME};
pub use volume::Volume;
