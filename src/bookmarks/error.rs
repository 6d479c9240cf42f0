//! Bookmark storage errors

use thiserror::Error;

/// Bookmark-store errors
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// The persisted slot did not hold a valid identity → flag map
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),
}
