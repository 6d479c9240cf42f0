//! Presentation-mode state machine
//!
//! ```text
//!             SelectCategory(d)
//!        ┌──────────────────────┐
//!        ▼                      │
//!   Browsing(c) ────────────────┘
//!     │    ▲
//!     │    │ filter becomes inactive / Clear  → Browsing(return_to)
//!     ▼    │
//!   Searching { filter, return_to: c } ──┐
//!        ▲                               │ SetQuery / ToggleTag / SetTags
//!        └───────────────────────────────┘ (filter still active)
//! ```
//!
//! Category selection is ignored while searching.

use crate::models::Category;
use crate::search::{Filter, Query, TagSelection};

/// User interaction driving the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A category tab was clicked
    SelectCategory(Category),
    /// The search field now holds this text
    SetQuery(String),
    /// A tag chip was clicked
    ToggleTag(String),
    /// The tag selector now holds exactly these tags
    SetTags(TagSelection),
    /// The clear/reset control was used
    Clear,
}

/// Exactly one presentation mode is active at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// One category's items in that category's container
    Browsing { category: Category },
    /// Cross-category results in the unified results container
    Searching { filter: Filter, return_to: Category },
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Browsing {
            category: Category::ALL[0],
        }
    }
}

impl ViewState {
    /// The single transition function
    #[must_use]
    pub fn apply(self, event: ViewEvent) -> Self {
        match (self, event) {
            (Self::Browsing { .. }, ViewEvent::SelectCategory(category)) => {
                Self::Browsing { category }
            }
            (state @ Self::Searching { .. }, ViewEvent::SelectCategory(_)) => state,

            (Self::Browsing { category }, ViewEvent::Clear)
            | (Self::Searching { return_to: category, .. }, ViewEvent::Clear) => {
                Self::Browsing { category }
            }

            (Self::Browsing { category }, event) => {
                Self::settle(Filter::default(), category, event)
            }
            (Self::Searching { filter, return_to }, event) => {
                Self::settle(filter, return_to, event)
            }
        }
    }

    /// Apply a filter edit and pick the mode the resulting filter implies
    fn settle(mut filter: Filter, return_to: Category, event: ViewEvent) -> Self {
        match event {
            ViewEvent::SetQuery(text) => filter.query = Query::new(&text),
            ViewEvent::ToggleTag(tag) => {
                filter.tags.toggle(&tag);
            }
            ViewEvent::SetTags(tags) => filter.tags = tags,
            ViewEvent::SelectCategory(_) | ViewEvent::Clear => {}
        }

        if filter.is_active() {
            Self::Searching { filter, return_to }
        } else {
            Self::Browsing {
                category: return_to,
            }
        }
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        matches!(self, Self::Searching { .. })
    }

    /// The category tab that is (or will again be) active
    #[must_use]
    pub const fn active_category(&self) -> Category {
        match self {
            Self::Browsing { category } => *category,
            Self::Searching { return_to, .. } => *return_to,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&Filter> {
        match self {
            Self::Browsing { .. } => None,
            Self::Searching { filter, .. } => Some(filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browsing(category: Category) -> ViewState {
        ViewState::Browsing { category }
    }

    #[test]
    fn test_initial_state_is_first_category() {
        assert_eq!(ViewState::default(), browsing(Category::Updates));
    }

    #[test]
    fn test_tab_switch_while_browsing() {
        let state = browsing(Category::Updates).apply(ViewEvent::SelectCategory(Category::Downloads));
        assert_eq!(state, browsing(Category::Downloads));
    }

    #[test]
    fn test_typing_enters_search_and_clearing_returns() {
        let state = browsing(Category::Updates).apply(ViewEvent::SetQuery("a".into()));
        assert!(state.is_searching());
        assert_eq!(state.active_category(), Category::Updates);

        let state = state.apply(ViewEvent::SetQuery(String::new()));
        assert_eq!(state, browsing(Category::Updates));
    }

    #[test]
    fn test_whitespace_query_does_not_search() {
        let state = browsing(Category::Downloads).apply(ViewEvent::SetQuery("   ".into()));
        assert_eq!(state, browsing(Category::Downloads));
    }

    #[test]
    fn test_tag_toggle_enters_and_leaves_search() {
        let state = browsing(Category::KnowledgeArticles).apply(ViewEvent::ToggleTag("x".into()));
        assert!(state.filter().is_some_and(|f| f.tags.contains("x")));

        let state = state.apply(ViewEvent::ToggleTag("x".into()));
        assert_eq!(state, browsing(Category::KnowledgeArticles));
    }

    #[test]
    fn test_search_stays_while_either_part_active() {
        let state = browsing(Category::Updates)
            .apply(ViewEvent::SetQuery("alpha".into()))
            .apply(ViewEvent::ToggleTag("x".into()))
            .apply(ViewEvent::SetQuery(String::new()));

        let filter = state.filter().expect("still searching");
        assert!(filter.query.is_empty());
        assert!(filter.tags.contains("x"));
    }

    #[test]
    fn test_refine_search_in_place() {
        let state = browsing(Category::Updates)
            .apply(ViewEvent::SetQuery("al".into()))
            .apply(ViewEvent::SetQuery("alpha".into()));

        assert_eq!(state.filter().map(|f| f.query.raw()), Some("alpha"));
    }

    #[test]
    fn test_tabs_inert_while_searching() {
        let searching = browsing(Category::Updates).apply(ViewEvent::SetQuery("a".into()));
        let after = searching.clone().apply(ViewEvent::SelectCategory(Category::Downloads));

        assert_eq!(after, searching);
        assert_eq!(after.active_category(), Category::Updates);
    }

    #[test]
    fn test_clear_returns_to_last_category() {
        let state = browsing(Category::Downloads)
            .apply(ViewEvent::SetQuery("a".into()))
            .apply(ViewEvent::ToggleTag("x".into()))
            .apply(ViewEvent::Clear);

        assert_eq!(state, browsing(Category::Downloads));
    }

    #[test]
    fn test_set_tags_replaces_selection() {
        let state = browsing(Category::Updates)
            .apply(ViewEvent::ToggleTag("x".into()))
            .apply(ViewEvent::SetTags(["y"].into_iter().collect()));

        let filter = state.filter().expect("searching");
        assert!(!filter.tags.contains("x"));
        assert!(filter.tags.contains("y"));

        let state = state.apply(ViewEvent::SetTags(TagSelection::new()));
        assert_eq!(state, browsing(Category::Updates));
    }
}
