//! Catalog domain types

mod album;
mod ids;
mod playlist;
mod song;

pub use album::{Album, AlbumSummary};
pub use ids::{AlbumId, ArtistId, PlaylistId, SongId};
pub use playlist::{Playlist, PlaylistSong};
pub use song::{ArtistSummary, Song};
