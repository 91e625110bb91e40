/// Core traits for Lytte
use crate::error::Result;
use crate::types::{Album, AlbumId, ProfileUpdate, SongUpload, Track, TrackId, User};
use std::collections::HashSet;

/// Catalog store trait
///
/// The in-process asynchronous data-access contract between the transport
/// engine / presentation layer and whatever holds the catalog. All
/// operations are best-effort from a caller's point of view: the transport
/// engine never retries them, and failures stay local to the operation that
/// invoked them.
#[allow(async_fn_in_trait)]
pub trait CatalogStore: Send + Sync {
    // User operations

    /// Get the session user
    async fn get_user(&self) -> Result<User>;

    /// Update the user profile
    ///
    /// A provided picture file is converted to a local object URL; nothing
    /// is transferred anywhere.
    async fn update_user_profile(&self, update: ProfileUpdate) -> Result<User>;

    // Library operations

    /// Get all albums
    async fn get_albums(&self) -> Result<Vec<Album>>;

    /// Get an album by id, or `None` if it has no match
    async fn get_album(&self, id: &AlbumId) -> Result<Option<Album>>;

    /// Search tracks by title, artist, or album title
    ///
    /// Case-insensitive substring match.
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;

    /// Pick one track for autoplay
    ///
    /// Chooses uniformly at random among tracks whose ids are not in
    /// `exclude`; returns `None` when every track is excluded.
    async fn autoplay_track(&self, exclude: &HashSet<TrackId>) -> Result<Option<Track>>;

    /// Add an uploaded song to the catalog
    ///
    /// Creates the album when `album_title` matches no existing album
    /// (case-insensitive); otherwise appends to the match.
    async fn upload_song(&self, upload: SongUpload) -> Result<Track>;

    // User collections

    /// Record a track in listening history (prepend, dedupe, cap)
    async fn add_to_history(&self, track: &Track) -> Result<()>;

    /// Get listening history, most recent first
    async fn history(&self) -> Result<Vec<Track>>;

    /// Get downloaded tracks
    async fn downloads(&self) -> Result<Vec<Track>>;

    /// Get liked tracks
    async fn liked_songs(&self) -> Result<Vec<Track>>;

    /// Mark a track as downloaded (idempotent)
    async fn add_download(&self, id: &TrackId) -> Result<()>;

    /// Remove a track from downloads (idempotent)
    async fn remove_download(&self, id: &TrackId) -> Result<()>;

    /// Mark a track as liked (idempotent)
    async fn add_liked_song(&self, id: &TrackId) -> Result<()>;

    /// Remove a track from liked songs (idempotent)
    async fn remove_liked_song(&self, id: &TrackId) -> Result<()>;
}
