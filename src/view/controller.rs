//! Session state owner
//!
//! [`ViewController`] holds everything the session mutates or derives: the
//! loaded item set, its tag index, the current [`ViewState`] and the optional
//! bookmark store. Handlers talk to it instead of sharing loose globals.
//!
//! # Workflow
//!
//! ```text
//! load() ──▶ ItemSet ──▶ TagIndex
//!                │
//!   user event ──▶ dispatch() ──▶ ViewState::apply()
//!                │
//!            visible() ──▶ render(renderer)
//! ```

use super::error::ViewError;
use super::render::{Container, DetailView, Renderer};
use super::state::{ViewEvent, ViewState};
use crate::bookmarks::BookmarkStore;
use crate::loader::{self, CollectionSource, LoadOptions};
use crate::models::{Category, Item, ItemSet};
use crate::search::{Ranked, TagSelection, browse_order, search_order};
use crate::tags::TagIndex;

/// Message shown in the results container when nothing matches
pub const NO_RESULTS: &str = "No results found.";

/// The ordered items the current state puts on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visible<'a> {
    /// Browse ordering restricted to one category
    Category {
        category: Category,
        items: Vec<&'a Item>,
    },
    /// Search ordering across all categories, with relevance scores
    SearchResults { hits: Vec<Ranked<'a>> },
}

impl<'a> Visible<'a> {
    #[must_use]
    pub const fn container(&self) -> Container {
        match self {
            Self::Category { category, .. } => Container::Category(*category),
            Self::SearchResults { .. } => Container::SearchResults,
        }
    }

    /// Items in display order, without scores
    #[must_use]
    pub fn items(&self) -> Vec<&'a Item> {
        match self {
            Self::Category { items, .. } => items.clone(),
            Self::SearchResults { hits } => hits.iter().map(|hit| hit.item).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Category { items, .. } => items.len(),
            Self::SearchResults { hits } => hits.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns the session's items, tag index, view state and bookmarks
pub struct ViewController {
    items: ItemSet,
    tags: TagIndex,
    state: ViewState,
    bookmarks: Option<BookmarkStore>,
}

impl ViewController {
    /// Start browsing the first category of `items`
    #[must_use]
    pub fn new(items: ItemSet) -> Self {
        let tags = TagIndex::build(&items);
        Self {
            items,
            tags,
            state: ViewState::default(),
            bookmarks: None,
        }
    }

    /// Load every collection from `source` and start a session over it
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Load` if any collection fails.
    pub async fn load(
        source: &dyn CollectionSource,
        options: LoadOptions,
    ) -> Result<Self, ViewError> {
        Ok(Self::new(loader::load(source, options).await?))
    }

    #[must_use]
    pub fn with_bookmarks(mut self, store: BookmarkStore) -> Self {
        self.bookmarks = Some(store);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn items(&self) -> &ItemSet {
        &self.items
    }

    #[must_use]
    pub const fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    #[must_use]
    pub const fn bookmarks(&self) -> Option<&BookmarkStore> {
        self.bookmarks.as_ref()
    }

    /// Feed one user interaction through the state machine
    pub fn dispatch(&mut self, event: ViewEvent) -> &ViewState {
        let was_searching = self.state.is_searching();
        let previous = std::mem::take(&mut self.state);
        self.state = previous.apply(event);

        if was_searching != self.state.is_searching() {
            tracing::debug!(
                searching = self.state.is_searching(),
                category = %self.state.active_category(),
                "view mode changed"
            );
        }
        &self.state
    }

    pub fn select_category(&mut self, category: Category) -> &ViewState {
        self.dispatch(ViewEvent::SelectCategory(category))
    }

    pub fn set_query(&mut self, text: &str) -> &ViewState {
        self.dispatch(ViewEvent::SetQuery(text.to_string()))
    }

    pub fn toggle_tag(&mut self, tag: &str) -> &ViewState {
        self.dispatch(ViewEvent::ToggleTag(tag.to_string()))
    }

    pub fn set_tags(&mut self, tags: TagSelection) -> &ViewState {
        self.dispatch(ViewEvent::SetTags(tags))
    }

    pub fn clear(&mut self) -> &ViewState {
        self.dispatch(ViewEvent::Clear)
    }

    /// Compute the ordered, filtered sequence for the current state
    #[must_use]
    pub fn visible(&self) -> Visible<'_> {
        match &self.state {
            ViewState::Browsing { category } => Visible::Category {
                category: *category,
                items: browse_order(self.items.in_category(*category)),
            },
            ViewState::Searching { filter, .. } => Visible::SearchResults {
                hits: search_order(&self.items, filter),
            },
        }
    }

    /// Push the current state to `renderer`
    ///
    /// Every category container is emptied first, so only the active mode
    /// leaves anything on screen.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let visible = self.visible();
        let searching = self.state.is_searching();

        renderer.set_tabs_enabled(!searching);
        renderer.set_search_visible(searching);
        for category in Category::ALL {
            renderer.clear(Container::Category(category));
        }
        renderer.clear(Container::SearchResults);

        let container = visible.container();
        for item in visible.items() {
            renderer.mount(item, container, self.is_bookmarked(item));
        }

        if searching && visible.is_empty() {
            renderer.show_message(Container::SearchResults, NO_RESULTS);
        }
    }

    /// First item with the given category and title
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotFound` if there is no such item.
    pub fn find(&self, category: Category, title: &str) -> Result<&Item, ViewError> {
        self.items
            .find(category, title)
            .ok_or_else(|| ViewError::NotFound {
                category,
                title: title.to_string(),
            })
    }

    /// Build the detail view for one item
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotFound` if there is no such item.
    pub fn detail(&self, category: Category, title: &str) -> Result<DetailView, ViewError> {
        let item = self.find(category, title)?;
        Ok(DetailView::new(item, self.is_bookmarked(item)))
    }

    /// Open the detail view for one item
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotFound` if there is no such item.
    pub fn show_detail<R: Renderer + ?Sized>(
        &self,
        category: Category,
        title: &str,
        renderer: &mut R,
    ) -> Result<(), ViewError> {
        renderer.show_detail(&self.detail(category, title)?);
        Ok(())
    }

    #[must_use]
    pub fn is_bookmarked(&self, item: &Item) -> bool {
        self.bookmarks
            .as_ref()
            .is_some_and(|store| store.is_bookmarked(&item.identity()))
    }

    /// Flip the bookmark of one item, returning the new flag
    ///
    /// # Errors
    ///
    /// Returns `ViewError::BookmarksDisabled` without a store,
    /// `ViewError::NotFound` for an unknown item, or `ViewError::Bookmark`
    /// if persisting fails.
    pub fn toggle_bookmark(&mut self, category: Category, title: &str) -> Result<bool, ViewError> {
        let identity = self.find(category, title)?.identity();
        let store = self
            .bookmarks
            .as_mut()
            .ok_or(ViewError::BookmarksDisabled)?;
        Ok(store.toggle(&identity)?)
    }

    /// Items currently bookmarked, in item-set order
    #[must_use]
    pub fn bookmarked_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| self.is_bookmarked(item))
            .collect()
    }

    /// Replace the item set with a fresh load from `source`
    ///
    /// The item set and tag index are swapped wholesale on success. On
    /// failure the previous items stay in place; the error is a
    /// `FilterFailure` while searching and a `Load` failure otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::FilterFailure` or `ViewError::Load` as above.
    pub async fn reload(
        &mut self,
        source: &dyn CollectionSource,
        options: LoadOptions,
    ) -> Result<(), ViewError> {
        match loader::load(source, options).await {
            Ok(items) => {
                self.tags = TagIndex::build(&items);
                self.items = items;
                Ok(())
            }
            Err(e) if self.state.is_searching() => Err(ViewError::FilterFailure(e)),
            Err(e) => Err(ViewError::Load(e)),
        }
    }
}

/// Show a load or filter failure in the containers it affects
///
/// A load failure replaces every category container with the message; a
/// filter failure replaces only the unified results. Other errors are not
/// container-scoped and are left to the caller.
pub fn render_failure<R: Renderer + ?Sized>(error: &ViewError, renderer: &mut R) {
    let message = error.to_string();
    match error {
        ViewError::Load(_) => {
            for category in Category::ALL {
                renderer.show_message(Container::Category(category), &message);
            }
        }
        ViewError::FilterFailure(_) => {
            renderer.show_message(Container::SearchResults, &message);
        }
        ViewError::NotFound { .. } | ViewError::BookmarksDisabled | ViewError::Bookmark(_) => {}
    }
}
