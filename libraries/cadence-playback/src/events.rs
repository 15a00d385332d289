//! Player Events
//!
//! Event-based communication for UI synchronization. The store queues an
//! event at each observable change; presentation code drains them with
//! [`PlayerStore::drain_events`](crate::PlayerStore::drain_events).

use crate::types::RepeatMode;
use cadence_core::SongId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Play/pause flag changed
    StateChanged {
        /// Whether playback is now active
        is_playing: bool,
    },

    /// A different song was loaded into the engine
    SongChanged {
        /// ID of the new (current) song
        song_id: SongId,
        /// ID of the previously loaded song (if any)
        previous_song_id: Option<SongId>,
    },

    /// Queue contents or current index changed
    QueueChanged {
        /// Number of entries
        length: usize,
        /// Current index
        index: Option<usize>,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Volume level (0.0 - 1.0)
        volume: f32,
        /// Mute state
        muted: bool,
    },

    /// Repeat or shuffle changed
    ModeChanged {
        /// Repeat mode
        repeat_mode: RepeatMode,
        /// Shuffle flag
        shuffle_enabled: bool,
    },

    /// A playback operation failed
    Error {
        /// Human-readable reason
        message: String,
    },
}

impl PlayerEvent {
    /// Check if this is an error event
    pub fn is_error(&self) -> bool {
        matches!(self, PlayerEvent::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_event_detection() {
        let error = PlayerEvent::Error {
            message: "blocked".to_string(),
        };
        assert!(error.is_error());

        let state = PlayerEvent::StateChanged { is_playing: true };
        assert!(!state.is_error());
    }

    #[test]
    fn event_serialization() {
        let event = PlayerEvent::SongChanged {
            song_id: SongId::new("s2"),
            previous_song_id: Some(SongId::new("s1")),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SongChanged"));
        assert!(json.contains("s2"));

        let back: PlayerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
