//! Cadence Core
//!
//! Catalog domain types shared by the playback queue and the generation
//! pipeline.
//!
//! The catalog API returns songs, albums and playlists as aggregates with
//! playable-source and cover URLs already resolved. These types mirror that
//! wire shape (camelCase JSON) so they can be deserialized directly.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{ArtistSummary, Song, SongId};
//! use std::time::Duration;
//!
//! let song = Song::new(
//!     SongId::new("song-1"),
//!     "Opening Theme",
//!     Duration::from_secs(212),
//!     "https://cdn.example.com/music/song-1.mp3",
//!     ArtistSummary::new("artist-1", "The Examples"),
//! );
//!
//! assert_eq!(song.duration(), Duration::from_secs(212));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    Album, AlbumId, AlbumSummary, ArtistId, ArtistSummary, Playlist, PlaylistId, PlaylistSong,
    Song, SongId,
};
