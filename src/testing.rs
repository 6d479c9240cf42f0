//! Testing utilities for reshub
//!
//! Fixture builders for items, a renderer that records every call it
//! receives, and a `TestStore` wrapper for a temporary bookmark database.
//!
//! Only available when compiled with `cfg(test)`.

use crate::bookmarks::BookmarkStore;
use crate::models::{Category, Item, ItemSet, RawRecord};
use crate::view::{Container, DetailView, Renderer};
use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a calendar date, panicking on invalid input
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Build a normalized item with the fields ordering and filtering care about
#[must_use]
pub fn item(
    category: Category,
    title: &str,
    date: Option<NaiveDate>,
    pinned: bool,
    tags: &[&str],
) -> Item {
    Item::from_raw(
        category,
        RawRecord {
            title: Some(title.to_string()),
            date: date.map(|d| d.format("%Y-%m-%d").to_string()),
            tags: Some(tags.iter().map(|t| (*t).to_string()).collect()),
            pinned: Some(pinned),
            ..Default::default()
        },
    )
}

/// Three updates: A (pinned, 2024-01-01, x), B (2024-06-01, x), C (2024-03-01, y)
#[must_use]
pub fn sample_items() -> ItemSet {
    ItemSet::new(vec![
        item(Category::Updates, "A", Some(date(2024, 1, 1)), true, &["x"]),
        item(Category::Updates, "B", Some(date(2024, 6, 1)), false, &["x"]),
        item(Category::Updates, "C", Some(date(2024, 3, 1)), false, &["y"]),
    ])
}

/// Items spread over every category
#[must_use]
pub fn mixed_items() -> ItemSet {
    ItemSet::new(vec![
        item(Category::Updates, "Alpha release", Some(date(2024, 5, 1)), false, &["release"]),
        item(Category::Updates, "Maintenance window", Some(date(2024, 7, 1)), true, &["ops"]),
        item(Category::KnowledgeArticles, "Reset a password", Some(date(2023, 2, 1)), false, &["account"]),
        item(Category::KnowledgeArticles, "Alpha channel FAQ", None, false, &["release", "faq"]),
        item(Category::Downloads, "Installer", Some(date(2024, 1, 15)), false, &["windows"]),
    ])
}

/// One call received by [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Clear(Container),
    Mount(Container, String),
    Message(Container, String),
    Tabs(bool),
    SearchVisible(bool),
    Detail(String),
}

/// Renderer that records calls instead of drawing anything
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles mounted into `container`, in mount order
    #[must_use]
    pub fn mounted(&self, container: Container) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Mount(c, title) if *c == container => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    /// Messages shown in `container`
    #[must_use]
    pub fn messages(&self, container: Container) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Message(c, text) if *c == container => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, container: Container) {
        self.calls.push(RenderCall::Clear(container));
    }

    fn mount(&mut self, item: &Item, container: Container, _bookmarked: bool) {
        self.calls.push(RenderCall::Mount(container, item.title.clone()));
    }

    fn show_message(&mut self, container: Container, message: &str) {
        self.calls
            .push(RenderCall::Message(container, message.to_string()));
    }

    fn set_tabs_enabled(&mut self, enabled: bool) {
        self.calls.push(RenderCall::Tabs(enabled));
    }

    fn set_search_visible(&mut self, visible: bool) {
        self.calls.push(RenderCall::SearchVisible(visible));
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.calls.push(RenderCall::Detail(detail.title.clone()));
    }
}

/// Temporary bookmark database that is removed on drop
///
/// # Examples
/// ```ignore
/// let store = TestStore::new();
/// let mut bookmarks = store.open();
/// bookmarks.toggle(&identity).unwrap();
/// ```
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("bookmarks")
    }

    /// Open (or reopen) the bookmark store in this directory
    ///
    /// # Panics
    /// Panics if the database cannot be opened.
    #[must_use]
    pub fn open(&self) -> BookmarkStore {
        BookmarkStore::open(self.path()).expect("Failed to open bookmark store")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}
