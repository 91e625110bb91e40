/// Track domain type
use crate::error::{LytteError, Result};
use crate::types::{AlbumRef, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable track
///
/// Immutable once created; re-uploading produces a new track with a new id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// The album this track belongs to
    pub album: AlbumRef,

    /// Track duration
    pub duration: Duration,

    /// Playable source reference (an object URL for uploaded files)
    pub url: String,

    /// Custom art from an uploaded file, overriding the album cover
    pub album_art_url: Option<String>,

    /// When the track was added to the catalog
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with a generated id
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: AlbumRef,
        duration: Duration,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            album,
            duration,
            url: url.into(),
            album_art_url: None,
            added_at: Utc::now(),
        }
    }
}

/// A file handed over by the user for a simulated transfer
///
/// No bytes are carried: the store only mints a local object URL for it,
/// standing in for a real upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Original file name, e.g. `song.mp3`
    pub file_name: String,
}

impl UploadedFile {
    /// Create a new uploaded file reference
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// Request to add a new song to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongUpload {
    /// The audio file being uploaded
    pub file: UploadedFile,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album title; matched case-insensitively against existing albums
    pub album_title: String,

    /// Custom album art, if the upload provided one
    pub album_art_url: Option<String>,

    /// Track duration, when the caller could determine it
    pub duration: Option<Duration>,
}

impl SongUpload {
    /// Check that all required fields are present
    ///
    /// Runs before any store mutation; a failure aborts the upload.
    pub fn validate(&self) -> Result<()> {
        if self.file.file_name.trim().is_empty() {
            return Err(LytteError::validation("missing audio file"));
        }
        if self.title.trim().is_empty() {
            return Err(LytteError::validation("missing track title"));
        }
        if self.artist.trim().is_empty() {
            return Err(LytteError::validation("missing artist name"));
        }
        if self.album_title.trim().is_empty() {
            return Err(LytteError::validation("missing album title"));
        }
        Ok(())
    }
}
