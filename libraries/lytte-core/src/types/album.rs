/// Album domain type
use crate::types::{AlbumId, Track};
use serde::{Deserialize, Serialize};

/// Lightweight album reference embedded in a [`Track`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Album identifier
    pub id: AlbumId,

    /// Album title
    pub title: String,

    /// Cover image reference
    pub cover: String,
}

/// An album with its ordered track list
///
/// Insertion order is track-list order. Every track in `tracks` carries an
/// `album.id` equal to this album's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Unique album identifier
    pub id: AlbumId,

    /// Album title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover image reference
    pub cover: String,

    /// Tracks in track-list order
    pub tracks: Vec<Track>,
}

impl Album {
    /// Create a new empty album with a generated id
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        cover: impl Into<String>,
    ) -> Self {
        Self {
            id: AlbumId::generate(),
            title: title.into(),
            artist: artist.into(),
            cover: cover.into(),
            tracks: Vec::new(),
        }
    }

    /// Get the embeddable reference for this album
    pub fn to_ref(&self) -> AlbumRef {
        AlbumRef {
            id: self.id.clone(),
            title: self.title.clone(),
            cover: self.cover.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_ref_mirrors_album() {
        let album = Album::new("Night Drive", "Various Artists", "local://covers/night-drive");
        let album_ref = album.to_ref();
        assert_eq!(album_ref.id, album.id);
        assert_eq!(album_ref.title, "Night Drive");
        assert_eq!(album_ref.cover, "local://covers/night-drive");
    }

    #[test]
    fn new_album_starts_empty() {
        let album = Album::new("A", "B", "C");
        assert!(album.tracks.is_empty());
    }
}
