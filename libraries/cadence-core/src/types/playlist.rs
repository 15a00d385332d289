//! Playlist domain types
use crate::types::{PlaylistId, Song};
use serde::{Deserialize, Serialize};

/// Playlist-song join entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSong {
    /// Position within the playlist
    pub order: u32,

    /// The song at this position
    pub song: Song,
}

/// Playlist with its join entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Playlist ID
    pub id: PlaylistId,

    /// Playlist title
    pub title: String,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Join entries
    #[serde(default)]
    pub songs: Vec<PlaylistSong>,
}

impl Playlist {
    /// Songs in stored playlist order
    pub fn songs(&self) -> Vec<Song> {
        let mut entries: Vec<&PlaylistSong> = self.songs.iter().collect();
        // Stable: entries sharing an order keep their received order
        entries.sort_by_key(|entry| entry.order);
        entries.into_iter().map(|entry| entry.song.clone()).collect()
    }

    /// Whether the playlist has no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
