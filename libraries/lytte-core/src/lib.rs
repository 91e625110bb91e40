//! Lytte Core
//!
//! Domain types, traits, and error handling for Lytte.
//!
//! This crate provides the foundational building blocks shared by the
//! catalog and playback crates:
//! - **Domain Types**: [`Track`], [`Album`], [`User`] and their id newtypes
//! - **Data-Access Contract**: the [`CatalogStore`] trait
//! - **Error Handling**: unified [`LytteError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use lytte_core::types::{Album, Track, User};
//! use std::time::Duration;
//!
//! // Create an album and a track that belongs to it
//! let album = Album::new("Night Drive", "Various Artists", "local://covers/night-drive");
//! let track = Track::new(
//!     "First Light",
//!     "Aria Vale",
//!     album.to_ref(),
//!     Duration::from_secs(214),
//!     "local://audio/first-light",
//! );
//! assert_eq!(track.album.id, album.id);
//!
//! // Create the session user
//! let user = User::new("Music Lover");
//! assert!(user.history.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{LytteError, Result};
pub use traits::CatalogStore;

// Export all types
pub use types::{
    Album, AlbumId, AlbumRef, ProfileUpdate, SongUpload, Track, TrackId, UploadedFile, User,
    UserId, HISTORY_LIMIT,
};
