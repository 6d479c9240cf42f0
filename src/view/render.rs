//! Render boundary
//!
//! The controller never draws anything itself. It tells a [`Renderer`] which
//! containers to clear, which items to mount where, and whether the category
//! tabs and the unified results container are usable.

use crate::models::{Category, Item};
use std::fmt;

/// Target container for rendered items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// Per-category container used while browsing
    Category(Category),
    /// Unified cross-category results used while searching
    SearchResults,
}

impl Container {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Category(category) => category.as_str(),
            Self::SearchResults => "search-results",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything a detail popup shows for one item
///
/// The body is split into paragraphs on blank lines; turning each paragraph
/// into rich text is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub category: Category,
    pub title: String,
    pub posted_on: Option<String>,
    pub tags: Vec<String>,
    pub paragraphs: Vec<String>,
    pub file: Option<String>,
    pub bookmarked: bool,
}

impl DetailView {
    #[must_use]
    pub fn new(item: &Item, bookmarked: bool) -> Self {
        Self {
            category: item.category,
            title: item.title.clone(),
            posted_on: item.posted_on(),
            tags: item.tags.iter().cloned().collect(),
            paragraphs: item
                .body()
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            file: item.file.clone(),
            bookmarked,
        }
    }
}

/// Presentation backend driven by the view controller
pub trait Renderer {
    /// Remove everything from `container`
    fn clear(&mut self, container: Container);

    /// Append one item to `container`
    fn mount(&mut self, item: &Item, container: Container, bookmarked: bool);

    /// Replace the contents of `container` with a static message
    fn show_message(&mut self, container: Container, message: &str);

    /// Enable or disable the category tabs
    fn set_tabs_enabled(&mut self, enabled: bool);

    /// Show or hide the unified results container
    fn set_search_visible(&mut self, visible: bool);

    /// Open the detail view for one item
    fn show_detail(&mut self, detail: &DetailView);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NO_CONTENT, RawRecord};

    #[test]
    fn test_container_ids() {
        assert_eq!(Container::Category(Category::Updates).id(), "updates");
        assert_eq!(
            Container::Category(Category::KnowledgeArticles).id(),
            "knowledge-articles"
        );
        assert_eq!(Container::Category(Category::Downloads).id(), "downloads");
        assert_eq!(Container::SearchResults.id(), "search-results");
    }

    #[test]
    fn test_detail_splits_paragraphs() {
        let item = Item::from_raw(
            Category::KnowledgeArticles,
            RawRecord {
                title: Some("Guide".into()),
                content: Some("First para.\n\nSecond **bold**.\n\n\n\nThird".into()),
                date: Some("2024-02-29".into()),
                tags: Some(vec!["b".into(), "a".into()]),
                file: Some("files/guide.pdf".into()),
                ..Default::default()
            },
        );

        let detail = DetailView::new(&item, true);

        assert_eq!(
            detail.paragraphs,
            vec!["First para.", "Second **bold**.", "Third"]
        );
        assert_eq!(detail.tags, vec!["a", "b"]);
        assert_eq!(detail.posted_on.as_deref(), Some("Posted on February 29, 2024"));
        assert_eq!(detail.file.as_deref(), Some("files/guide.pdf"));
        assert!(detail.bookmarked);
    }

    #[test]
    fn test_detail_uses_placeholder_body() {
        let item = Item::from_raw(Category::Updates, RawRecord::default());
        let detail = DetailView::new(&item, false);
        assert_eq!(detail.paragraphs, vec![NO_CONTENT]);
        assert_eq!(detail.posted_on, None);
    }
}
