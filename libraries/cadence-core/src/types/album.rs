//! Album domain types
use crate::types::{AlbumId, ArtistSummary, Song};
use serde::{Deserialize, Serialize};

/// Album reference carried by songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    /// Album ID
    pub id: AlbumId,

    /// Album title
    pub title: String,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Album with its songs in track order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Album ID
    pub id: AlbumId,

    /// Album title
    pub title: String,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Album artist
    pub artist: ArtistSummary,

    /// Songs in track order
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Album {
    /// Reference to this album for attaching to songs
    pub fn summary(&self) -> AlbumSummary {
        AlbumSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Songs ready for the play queue
    ///
    /// The album endpoint nests songs without their album/artist back
    /// references, so both are filled in from the album itself.
    pub fn playback_songs(&self) -> Vec<Song> {
        let summary = self.summary();
        self.songs
            .iter()
            .map(|song| Song {
                album: Some(summary.clone()),
                artist: self.artist.clone(),
                ..song.clone()
            })
            .collect()
    }

    /// Whether the album has no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
