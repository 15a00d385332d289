//! Shared test helpers

#![allow(dead_code)]

use cadence_core::{ArtistSummary, Song, SongId};
use cadence_playback::{
    MemoryPreferenceStore, PlaybackEngine, PlaybackError, PlayerStore, Result,
};
use std::time::Duration;

/// Engine that records every call
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub loaded: Option<String>,
    pub loads: Vec<String>,
    pub playing: bool,
    pub play_calls: usize,
    pub position: Duration,
    pub seeks: Vec<Duration>,
    pub volume: f32,
    pub muted: bool,
    /// Refuse every `play` (autoplay blocked)
    pub fail_play: bool,
    /// Refuse every `seek`
    pub fail_seek: bool,
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, source: &str) -> Result<()> {
        self.loaded = Some(source.to_string());
        self.loads.push(source.to_string());
        self.playing = false;
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.fail_play {
            return Err(PlaybackError::Engine("autoplay blocked".to_string()));
        }
        if self.loaded.is_none() {
            return Err(PlaybackError::NoSourceLoaded);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        if self.fail_seek {
            return Err(PlaybackError::InvalidSeekPosition(position));
        }
        self.seeks.push(position);
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

pub fn song(id: &str) -> Song {
    Song::new(
        SongId::new(id),
        format!("Song {}", id),
        Duration::from_secs(180),
        source_url(id),
        ArtistSummary::new("artist-1", "Test Artist"),
    )
}

pub fn songs(ids: &[&str]) -> Vec<Song> {
    ids.iter().map(|id| song(id)).collect()
}

pub fn source_url(id: &str) -> String {
    format!("https://cdn.example.com/music/{}.mp3", id)
}

pub fn store() -> PlayerStore<FakeEngine> {
    store_with(MemoryPreferenceStore::new())
}

pub fn store_with(preferences: MemoryPreferenceStore) -> PlayerStore<FakeEngine> {
    PlayerStore::new(FakeEngine::default(), Box::new(preferences)).with_shuffle_seed(42)
}

/// Store playing `ids[index]` out of `ids`
pub fn playing(ids: &[&str], index: usize) -> PlayerStore<FakeEngine> {
    let mut store = store();
    let queue = songs(ids);
    store.play_song(queue[index].clone(), queue);
    store.drain_events();
    store
}

/// IDs of the queue in play order
pub fn queue_ids(store: &PlayerStore<FakeEngine>) -> Vec<String> {
    store
        .queue()
        .iter()
        .map(|entry| entry.song().id.to_string())
        .collect()
}

/// IDs of the queue in unshuffled order
pub fn original_ids(store: &PlayerStore<FakeEngine>) -> Vec<String> {
    store
        .original_queue()
        .iter()
        .map(|entry| entry.song().id.to_string())
        .collect()
}

pub fn current_id(store: &PlayerStore<FakeEngine>) -> Option<String> {
    store.current_song().map(|song| song.id.to_string())
}
