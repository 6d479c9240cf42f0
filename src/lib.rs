//! Reshub - A resource hub over updates, knowledge articles and downloads
//!
//! This library loads three published collections, normalizes them into one
//! item set with a tag index, and drives a two-mode view (browsing one
//! category or searching across all of them) with optional bookmarks kept in
//! an embedded database.

use thiserror::Error;

pub mod bookmarks;
pub mod cli;
pub mod config;
pub mod loader;
pub mod models;
pub mod output;
pub mod search;
pub mod shell;
pub mod tags;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use bookmarks::{BookmarkError, BookmarkStore};
pub use loader::{CollectionSource, LoadError, LoadOptions};
pub use models::{Category, Identity, Item, ItemSet};
pub use tags::TagIndex;
pub use view::{ViewController, ViewError, ViewState};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ReshubError {
    /// Collection loading error
    #[error("{0}")]
    LoadError(#[from] loader::LoadError),
    /// View error (load, filter, lookup or bookmark failure)
    #[error("{0}")]
    ViewError(#[from] view::ViewError),
    /// Bookmark database error
    #[error("Bookmark error: {0}")]
    BookmarkError(#[from] bookmarks::BookmarkError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Unrecognized category name
    #[error(transparent)]
    UnknownCategory(#[from] models::UnknownCategory),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
