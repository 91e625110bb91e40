/// Core error types for Lytte
use thiserror::Error;

/// Result type alias using `LytteError`
pub type Result<T> = std::result::Result<T, LytteError>;

/// Core error type for Lytte
///
/// Covers the failure classes of the data-access boundary. Playback-local
/// failures live in the playback crate's own error type.
#[derive(Error, Debug)]
pub enum LytteError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "album" or "track"
        entity: String,
        /// The id that had no match
        id: String,
    },

    /// Input rejected before any store mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Simulated transfer (upload) failed; store state unchanged
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Persistence-layer errors
    #[error("Store error: {0}")]
    Store(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl LytteError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transfer error
    pub fn transfer(msg: impl Into<String>) -> Self {
        Self::Transfer(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
