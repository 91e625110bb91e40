//! Error types for transport control

use thiserror::Error;

/// Transport errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Audio sink error
    #[error("Audio sink error: {0}")]
    Sink(String),

    /// Catalog store error
    #[error(transparent)]
    Catalog(#[from] lytte_core::LytteError),
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
