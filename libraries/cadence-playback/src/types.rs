//! Core types for playback management

use cadence_core::Song;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Volume used when nothing valid has been persisted
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current song only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off → All → One → Off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Stable identity of one queue slot
///
/// The same song may be queued more than once; each slot still gets its own
/// `EntryId`, which is what shuffle restore and removal match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One slot in the play queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    id: EntryId,
    song: Song,
}

impl QueueEntry {
    pub(crate) fn new(id: EntryId, song: Song) -> Self {
        Self { id, song }
    }

    /// Slot identity
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The queued song
    pub fn song(&self) -> &Song {
        &self.song
    }
}

/// Durable player preferences
///
/// Exactly these four fields survive a session. Queue contents and the
/// playback position are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerPreferences {
    /// Volume (0.0 - 1.0)
    pub volume: f32,

    /// Mute state
    pub muted: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Shuffle flag
    pub shuffle_enabled: bool,
}

impl PlayerPreferences {
    /// Clamp values read back from storage into their valid ranges
    pub fn sanitized(self) -> Self {
        let volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };

        Self { volume, ..self }
    }
}

impl Default for PlayerPreferences {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
            repeat_mode: RepeatMode::Off,
            shuffle_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_cycles() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RepeatMode::All).unwrap(), "\"all\"");
        let mode: RepeatMode = serde_json::from_str("\"one\"").unwrap();
        assert_eq!(mode, RepeatMode::One);
    }

    #[test]
    fn default_preferences() {
        let prefs = PlayerPreferences::default();
        assert_eq!(prefs.volume, 0.8);
        assert!(!prefs.muted);
        assert_eq!(prefs.repeat_mode, RepeatMode::Off);
        assert!(!prefs.shuffle_enabled);
    }

    #[test]
    fn sanitized_clamps_volume() {
        let loud = PlayerPreferences {
            volume: 3.5,
            ..Default::default()
        };
        assert_eq!(loud.sanitized().volume, 1.0);

        let negative = PlayerPreferences {
            volume: -0.2,
            ..Default::default()
        };
        assert_eq!(negative.sanitized().volume, 0.0);

        let nan = PlayerPreferences {
            volume: f32::NAN,
            muted: true,
            ..Default::default()
        };
        let fixed = nan.sanitized();
        assert_eq!(fixed.volume, DEFAULT_VOLUME);
        assert!(fixed.muted);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let prefs: PlayerPreferences = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(prefs.muted);
        assert_eq!(prefs.volume, DEFAULT_VOLUME);
        assert_eq!(prefs.repeat_mode, RepeatMode::Off);
    }

    #[test]
    fn preferences_use_camel_case_keys() {
        let prefs = PlayerPreferences {
            volume: 0.5,
            muted: false,
            repeat_mode: RepeatMode::One,
            shuffle_enabled: true,
        };
        let json = serde_json::to_value(prefs).unwrap();
        assert_eq!(json["repeatMode"], "one");
        assert_eq!(json["shuffleEnabled"], true);
    }
}
