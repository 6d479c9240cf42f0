//! View-controller error types
//!
//! - **`Load`**: a (re)load failed while browsing; every category container shows it
//! - **`FilterFailure`**: a reload failed while searching; only the results
//!   container shows it and the previous items stay in place
//! - **`NotFound`**: no item with the requested category and title
//! - **`BookmarksDisabled`** / **`Bookmark`**: bookmark toggling problems

use crate::bookmarks::BookmarkError;
use crate::loader::LoadError;
use crate::models::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Error loading content: {0}")]
    Load(#[from] LoadError),

    #[error("Error filtering content: {0}")]
    FilterFailure(#[source] LoadError),

    #[error("No {category} item titled '{title}'")]
    NotFound { category: Category, title: String },

    #[error("Bookmarks are disabled")]
    BookmarksDisabled,

    #[error("Bookmark error: {0}")]
    Bookmark(#[from] BookmarkError),
}
