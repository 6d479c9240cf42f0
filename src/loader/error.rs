//! Loader-specific error types
//!
//! - **`FetchError`**: why a single named collection could not be retrieved
//! - **`LoadError`**: session-level failure naming the category that broke the load
//!
//! A load is all-or-nothing. The first failing collection aborts the merge and
//! no category renders.

use crate::models::{Category, Identity};
use thiserror::Error;

/// Failure retrieving one collection from its source
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading a local collection file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload was not a JSON array of records
    #[error("Malformed collection: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP-like status for diagnostics, when one applies
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Failure loading the merged item set
#[derive(Debug, Error)]
pub enum LoadError {
    /// One of the collections failed to fetch or decode
    #[error("Failed to fetch {category}.json: {source}")]
    Collection {
        category: Category,
        #[source]
        source: FetchError,
    },

    /// Two items resolved to the same identity while strict identities are enforced
    #[error("Duplicate item identity '{identity}'")]
    DuplicateIdentity { identity: Identity },
}

impl LoadError {
    /// The category whose collection failed, if the failure was a fetch
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Collection { category, .. } => Some(*category),
            Self::DuplicateIdentity { .. } => None,
        }
    }
}
