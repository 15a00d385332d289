//! Song domain types
use crate::types::{AlbumSummary, ArtistId, SongId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Artist reference carried by songs and albums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    /// Artist ID
    pub id: ArtistId,

    /// Display name
    pub name: String,

    /// Artist image URL (pre-resolved by the catalog)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ArtistSummary {
    /// Create an artist reference without an image
    pub fn new(id: impl Into<ArtistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
        }
    }
}

/// Empty reference, used when a nested payload omits the artist
impl Default for ArtistSummary {
    fn default() -> Self {
        Self::new(ArtistId::new(""), "")
    }
}

/// A playable song as returned by the catalog API
///
/// `url` and `image_url` are already resolved (typically presigned
/// object-storage links); this crate never resolves them itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Duration in whole seconds
    #[serde(rename = "duration")]
    pub duration_secs: u32,

    /// Playable source URL
    pub url: String,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Genre tag, used as the style for generated audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Owning album (singles have none)
    #[serde(default)]
    pub album: Option<AlbumSummary>,

    /// Owning artist (empty when nested under an album)
    #[serde(default)]
    pub artist: ArtistSummary,
}

impl Song {
    /// Create a song with no album, cover or genre
    pub fn new(
        id: SongId,
        title: impl Into<String>,
        duration: Duration,
        url: impl Into<String>,
        artist: ArtistSummary,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            duration_secs: u32::try_from(duration.as_secs()).unwrap_or(u32::MAX),
            url: url.into(),
            image_url: None,
            genre: None,
            album: None,
            artist,
        }
    }

    /// Song duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }
}
