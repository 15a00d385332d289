//! Player store - core orchestration
//!
//! Owns the play queue, playback flags and the single engine handle. UI
//! actions call store methods; the platform shell forwards engine signals
//! through [`PlayerStore::handle_engine_event`].

use crate::{
    engine::{EngineEvent, PlaybackEngine},
    error::PlaybackError,
    events::PlayerEvent,
    preferences::PreferenceStore,
    queue::Queue,
    types::{PlayerPreferences, QueueEntry, RepeatMode},
    volume::Volume,
};
use cadence_core::{Album, Playlist, Song, SongId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Past this position "previous" restarts the current song instead
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Central player state
///
/// Orchestrates:
/// - Queue management (play order + unshuffled order)
/// - Play/pause against the engine
/// - Volume and mute
/// - Shuffle and repeat (Off, All, One)
/// - Preference persistence (volume, mute, repeat, shuffle only)
///
/// Engine failures never escape: they are logged, reported as
/// [`PlayerEvent::Error`], and leave `is_playing` false. Out-of-range queue
/// indices are ignored.
pub struct PlayerStore<E: PlaybackEngine> {
    // Engine
    engine: E,
    loaded_song: Option<SongId>,

    // State
    queue: Queue,
    is_playing: bool,
    progress: Duration,
    duration: Duration,

    // Settings
    volume: Volume,
    repeat_mode: RepeatMode,
    shuffle_enabled: bool,
    preference_store: Box<dyn PreferenceStore>,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<E: PlaybackEngine> PlayerStore<E> {
    /// Create a store around `engine`
    ///
    /// Reads persisted preferences and applies volume/mute to the engine.
    /// Unreadable preferences fall back to defaults.
    pub fn new(mut engine: E, preference_store: Box<dyn PreferenceStore>) -> Self {
        let preferences = match preference_store.load() {
            Ok(Some(stored)) => stored.sanitized(),
            Ok(None) => PlayerPreferences::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load player preferences, using defaults");
                PlayerPreferences::default()
            }
        };

        engine.set_volume(preferences.volume);
        engine.set_muted(preferences.muted);

        debug!(
            volume = preferences.volume,
            muted = preferences.muted,
            repeat = ?preferences.repeat_mode,
            shuffle = preferences.shuffle_enabled,
            "Player store initialized"
        );

        Self {
            engine,
            loaded_song: None,
            queue: Queue::new(),
            is_playing: false,
            progress: Duration::ZERO,
            duration: Duration::ZERO,
            volume: Volume::new(preferences.volume, preferences.muted),
            repeat_mode: preferences.repeat_mode,
            shuffle_enabled: preferences.shuffle_enabled,
            preference_store,
            rng: StdRng::from_entropy(),
            pending_events: Vec::new(),
        }
    }

    /// Use a fixed shuffle seed (reproducible shuffles)
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ===== Starting Playback =====

    /// Play `song`, replacing the queue with `songs`
    ///
    /// An empty `songs` queues just `song`. If `song` is not part of `songs`
    /// it is put in front so it still becomes the current song.
    pub fn play_song(&mut self, song: Song, mut songs: Vec<Song>) {
        let index = if songs.is_empty() {
            songs.push(song);
            0
        } else if let Some(position) = songs.iter().position(|s| s.id == song.id) {
            position
        } else {
            songs.insert(0, song);
            0
        };

        self.queue.replace(songs, index);
        self.set_playing(true);
        self.emit_queue_changed();
        self.play_current_entry();
    }

    /// Play an album from its first song
    pub fn play_album(&mut self, album: &Album) {
        let songs = album.playback_songs();
        let Some(first) = songs.first().cloned() else {
            debug!(album_id = %album.id, "Album has no songs, nothing to play");
            return;
        };
        self.play_song(first, songs);
    }

    /// Play a playlist from its first song
    pub fn play_playlist(&mut self, playlist: &Playlist) {
        let songs = playlist.songs();
        let Some(first) = songs.first().cloned() else {
            debug!(playlist_id = %playlist.id, "Playlist has no songs, nothing to play");
            return;
        };
        self.play_song(first, songs);
    }

    // ===== Playback Control =====

    /// Pause if playing, otherwise try to start
    ///
    /// A refused start, including one with no song loaded, is reported and
    /// leaves the store paused.
    pub fn toggle_play_pause(&mut self) {
        if self.loaded_song.is_none() {
            let e = PlaybackError::NoSourceLoaded;
            warn!(error = %e, "Failed to start playback");
            self.emit_error(format!("Failed to start playback: {}", e));
            return;
        }

        if self.is_playing {
            self.engine.pause();
            self.set_playing(false);
            return;
        }

        match self.engine.play() {
            Ok(()) => self.set_playing(true),
            Err(e) => {
                warn!(error = %e, "Failed to start playback");
                self.emit_error(format!("Failed to start playback: {}", e));
            }
        }
    }

    /// Set volume (0.0 - 1.0, not clamped)
    ///
    /// Raising the volume while muted unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        self.engine.set_volume(volume);
        if self.volume.set_level(volume) {
            self.engine.set_muted(false);
        }
        self.emit_volume_changed();
        self.persist_preferences();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        let muted = self.volume.toggle_mute();
        self.engine.set_muted(muted);
        self.emit_volume_changed();
        self.persist_preferences();
    }

    /// Seek within the current song
    ///
    /// Clamped to the known duration. Progress updates immediately rather
    /// than waiting for the engine's next time update.
    pub fn set_progress(&mut self, position: Duration) {
        let position = position.min(self.duration);

        match self.engine.seek(position) {
            Ok(()) => self.progress = position,
            Err(e) => warn!(error = %e, position = ?position, "Failed to seek"),
        }
    }

    /// Skip to the next entry
    ///
    /// At the end of the queue: Repeat Off stops, Repeat All wraps to the
    /// first entry. A manual skip under Repeat One also wraps.
    pub fn next_song(&mut self) {
        let Some(index) = self.queue.index() else {
            return;
        };

        let mut next = index + 1;
        if next >= self.queue.len() {
            match self.repeat_mode {
                RepeatMode::Off => {
                    debug!("Reached end of queue, stopping");
                    self.engine.pause();
                    self.set_playing(false);
                    return;
                }
                RepeatMode::All | RepeatMode::One => next = 0,
            }
        }

        self.queue.select(next);
        self.emit_queue_changed();
        self.play_current_entry();
    }

    /// Go to the previous entry
    ///
    /// If >3 seconds into the current song, restarts it instead. Otherwise
    /// wraps backwards from the first entry to the last.
    pub fn previous_song(&mut self) {
        let Some(index) = self.queue.index() else {
            return;
        };

        if self.progress > RESTART_THRESHOLD {
            self.set_progress(Duration::ZERO);
            return;
        }

        let len = self.queue.len();
        self.queue.select((index + len - 1) % len);
        self.emit_queue_changed();
        self.play_current_entry();
    }

    /// React to an engine signal
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::TimeUpdate(position) => self.progress = position,
            EngineEvent::MetadataLoaded { duration } => self.duration = duration,
            EngineEvent::Ended => self.handle_ended(),
        }
    }

    /// Current song finished on its own
    ///
    /// Repeat One replays in place and never moves the index; every other
    /// mode defers to [`next_song`](Self::next_song).
    fn handle_ended(&mut self) {
        if self.repeat_mode != RepeatMode::One {
            self.next_song();
            return;
        }

        if self.queue.current().is_none() {
            return;
        }

        self.progress = Duration::ZERO;
        if let Err(e) = self.engine.restart() {
            warn!(error = %e, "Failed to rewind for repeat one");
        }
        if let Err(e) = self.engine.play() {
            warn!(error = %e, "Failed to replay audio in repeat one mode");
            self.emit_error(format!("Failed to replay song: {}", e));
            self.set_playing(false);
        }
    }

    // ===== Queue Management =====

    /// Empty the queue and stop
    pub fn clear_queue(&mut self) {
        if self.is_playing {
            self.engine.pause();
        }

        self.queue.clear();
        self.loaded_song = None;
        self.set_playing(false);
        self.progress = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.emit_queue_changed();
    }

    /// Queue `song` right after the current entry
    ///
    /// On an empty queue the song starts playing immediately. Otherwise
    /// current playback is not interrupted.
    pub fn play_next(&mut self, song: Song) {
        if self.queue.is_empty() {
            self.queue.replace(vec![song], 0);
            self.set_playing(true);
            self.emit_queue_changed();
            self.play_current_entry();
            return;
        }

        self.queue.insert_next(song);
        self.emit_queue_changed();
    }

    /// Append `song` to the end of the queue
    ///
    /// The first song added to an empty queue starts playing.
    pub fn add_to_queue(&mut self, song: Song) {
        let was_empty = self.queue.push(song);
        self.emit_queue_changed();

        if was_empty {
            self.set_playing(true);
            self.play_current_entry();
        }
    }

    /// Remove the entry at `index`
    ///
    /// Ignored when it would empty the queue or `index` is out of range.
    /// Removing the current entry loads its successor.
    pub fn remove_from_queue(&mut self, index: usize) {
        let Some(removal) = self.queue.remove(index) else {
            debug!(index, len = self.queue.len(), "Ignoring queue removal");
            return;
        };

        debug!(index, entry = %removal.entry.id(), "Removed queue entry");
        self.emit_queue_changed();

        if removal.was_current {
            self.play_current_entry();
        }
    }

    /// Jump to and play the entry at `index`
    pub fn jump_to_queue_item(&mut self, index: usize) {
        if !self.queue.select(index) {
            debug!(index, len = self.queue.len(), "Ignoring jump outside queue");
            return;
        }

        self.set_playing(true);
        self.emit_queue_changed();
        self.play_current_entry();
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle
    ///
    /// Enabling keeps the current entry playing and moves it to the front;
    /// disabling restores the unshuffled order around it.
    pub fn toggle_shuffle(&mut self) {
        if self.shuffle_enabled {
            self.queue.restore_original_order();
        } else {
            self.queue.shuffle(&mut self.rng);
        }
        self.shuffle_enabled = !self.shuffle_enabled;

        info!(enabled = self.shuffle_enabled, "Shuffle toggled");
        self.emit_queue_changed();
        self.emit_mode_changed();
        self.persist_preferences();
    }

    /// Cycle repeat mode: Off → All → One → Off
    pub fn toggle_repeat_mode(&mut self) {
        self.repeat_mode = self.repeat_mode.cycle();

        info!(mode = ?self.repeat_mode, "Repeat mode changed");
        self.emit_mode_changed();
        self.persist_preferences();
    }

    // ===== State Queries =====

    /// Currently selected song
    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current().map(QueueEntry::song)
    }

    /// Queue in play order
    pub fn queue(&self) -> &[QueueEntry] {
        self.queue.entries()
    }

    /// Queue in unshuffled order
    pub fn original_queue(&self) -> &[QueueEntry] {
        self.queue.original()
    }

    /// Current queue index
    pub fn queue_index(&self) -> Option<usize> {
        self.queue.index()
    }

    /// Whether playback is active
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Volume level (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Playback position in the current song
    pub fn progress(&self) -> Duration {
        self.progress
    }

    /// Duration of the current song (zero until metadata loads)
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Whether shuffle is on
    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Check if "next" would move to another entry
    pub fn has_next(&self) -> bool {
        match self.queue.index() {
            Some(index) => index + 1 < self.queue.len() || self.repeat_mode != RepeatMode::Off,
            None => false,
        }
    }

    /// Check if "previous" has anywhere to go
    pub fn has_previous(&self) -> bool {
        self.queue.index().is_some()
    }

    /// Snapshot of the durable fields
    pub fn preferences(&self) -> PlayerPreferences {
        PlayerPreferences {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            repeat_mode: self.repeat_mode,
            shuffle_enabled: self.shuffle_enabled,
        }
    }

    /// The engine handle
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine handle
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ===== Events =====

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check for pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Load the current entry into the engine and start it if playing
    fn play_current_entry(&mut self) {
        let Some(song) = self.current_song().cloned() else {
            return;
        };

        self.progress = Duration::ZERO;
        self.duration = Duration::ZERO;

        let previous_song_id = self.loaded_song.replace(song.id.clone());
        self.pending_events.push(PlayerEvent::SongChanged {
            song_id: song.id.clone(),
            previous_song_id,
        });

        if let Err(e) = self.engine.load(&song.url) {
            warn!(song_id = %song.id, error = %e, "Failed to load song");
            self.emit_error(format!("Failed to load \"{}\": {}", song.title, e));
            self.set_playing(false);
            return;
        }

        if !self.is_playing {
            return;
        }

        if let Err(e) = self.engine.play() {
            warn!(song_id = %song.id, error = %e, "Failed to play audio");
            self.emit_error(format!("Failed to play \"{}\": {}", song.title, e));
            self.set_playing(false);
        }
    }

    fn set_playing(&mut self, is_playing: bool) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            self.pending_events
                .push(PlayerEvent::StateChanged { is_playing });
        }
    }

    fn persist_preferences(&mut self) {
        let preferences = self.preferences();
        if let Err(e) = self.preference_store.save(&preferences) {
            warn!(error = %e, "Failed to persist player preferences");
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
            index: self.queue.index(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    fn emit_mode_changed(&mut self) {
        self.pending_events.push(PlayerEvent::ModeChanged {
            repeat_mode: self.repeat_mode,
            shuffle_enabled: self.shuffle_enabled,
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlayerEvent::Error { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::preferences::MemoryPreferenceStore;
    use cadence_core::ArtistSummary;

    /// Engine that accepts everything
    #[derive(Default)]
    struct SilentEngine {
        volume: f32,
        muted: bool,
    }

    impl PlaybackEngine for SilentEngine {
        fn load(&mut self, _source: &str) -> Result<()> {
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            Ok(())
        }

        fn pause(&mut self) {}

        fn seek(&mut self, _position: Duration) -> Result<()> {
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }

    fn create_test_song(id: &str) -> Song {
        Song::new(
            SongId::new(id),
            format!("Song {}", id),
            Duration::from_secs(180),
            format!("https://cdn.example.com/{}.mp3", id),
            ArtistSummary::new("artist", "Test Artist"),
        )
    }

    fn create_store() -> PlayerStore<SilentEngine> {
        PlayerStore::new(
            SilentEngine::default(),
            Box::new(MemoryPreferenceStore::new()),
        )
    }

    #[test]
    fn create_player_store() {
        let store = create_store();
        assert!(store.queue().is_empty());
        assert_eq!(store.queue_index(), None);
        assert!(!store.is_playing());
        assert_eq!(store.volume(), 0.8);
        assert_eq!(store.engine().volume, 0.8);
    }

    #[test]
    fn restores_persisted_preferences_into_engine() {
        let prefs = MemoryPreferenceStore::with_preferences(PlayerPreferences {
            volume: 0.25,
            muted: true,
            repeat_mode: RepeatMode::One,
            shuffle_enabled: true,
        });
        let store = PlayerStore::new(SilentEngine::default(), Box::new(prefs));

        assert_eq!(store.volume(), 0.25);
        assert!(store.is_muted());
        assert_eq!(store.repeat_mode(), RepeatMode::One);
        assert!(store.is_shuffle_enabled());
        assert!(store.engine().muted);
    }

    #[test]
    fn play_song_not_in_list_is_prepended() {
        let mut store = create_store();
        let stray = create_test_song("x");

        store.play_song(stray.clone(), vec![create_test_song("a"), create_test_song("b")]);

        assert_eq!(store.current_song(), Some(&stray));
        assert_eq!(store.queue_index(), Some(0));
        assert_eq!(store.queue().len(), 3);
    }

    #[test]
    fn events_are_drained() {
        let mut store = create_store();
        store.add_to_queue(create_test_song("a"));

        assert!(store.has_pending_events());
        let events = store.drain_events();
        assert!(events.contains(&PlayerEvent::StateChanged { is_playing: true }));
        assert!(events.iter().any(|e| matches!(e, PlayerEvent::SongChanged { .. })));
        assert!(!store.has_pending_events());
    }

    #[test]
    fn has_next_and_previous() {
        let mut store = create_store();
        assert!(!store.has_next());
        assert!(!store.has_previous());

        store.play_song(create_test_song("a"), vec![create_test_song("a"), create_test_song("b")]);
        assert!(store.has_next());
        assert!(store.has_previous());

        store.next_song();
        assert!(!store.has_next());

        store.toggle_repeat_mode();
        assert!(store.has_next());
    }
}
