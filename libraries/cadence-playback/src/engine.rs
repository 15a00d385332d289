//! Playback engine adapter
//!
//! Abstracts the single media handle the player drives (an HTML audio
//! element in a browser shell, a native decoder/output pair elsewhere).

use crate::error::Result;
use std::time::Duration;

/// The one media handle owned by [`PlayerStore`](crate::PlayerStore)
///
/// The store is the only caller. Loading a new source implicitly abandons
/// any start attempt for the previous one.
pub trait PlaybackEngine: Send {
    /// Replace the current source and begin loading it
    fn load(&mut self, source: &str) -> Result<()>;

    /// Start or resume playback of the loaded source
    ///
    /// May be refused (autoplay policy, network failure, nothing loaded).
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool);

    /// Seek back to the start of the source
    ///
    /// Equivalent to `seek(Duration::ZERO)`
    fn restart(&mut self) -> Result<()> {
        self.seek(Duration::ZERO)
    }
}

/// Signals raised by the engine
///
/// The platform shell forwards these to
/// [`PlayerStore::handle_engine_event`](crate::PlayerStore::handle_engine_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Playhead moved during playback
    TimeUpdate(Duration),

    /// Source reached its end
    Ended,

    /// Source metadata (duration) became available
    MetadataLoaded {
        /// Total source duration
        duration: Duration,
    },
}
