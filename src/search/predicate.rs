//! Search and tag predicates
//!
//! - Keywords (whitespace-separated, case-insensitive) combine with AND over
//!   the item's title, body and tags. An empty query matches everything.
//! - Selected tags combine with OR. No selection matches everything; an item
//!   without tags never satisfies a non-empty selection.
//! - The two predicates combine with AND.

use crate::models::Item;
use std::collections::BTreeSet;

/// Parsed free-text search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    phrase: String,
    keywords: Vec<String>,
}

impl Query {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let phrase = text.trim().to_lowercase();
        let keywords = phrase.split_whitespace().map(str::to_string).collect();
        Self {
            raw: text.to_string(),
            phrase,
            keywords,
        }
    }

    /// Text exactly as typed
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased, untokenized query used for relevance scoring
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when the query has no keywords (blank or whitespace only)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Every keyword must appear somewhere in the item's searchable text
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if self.is_empty() {
            return true;
        }
        let haystack = searchable_text(item);
        self.keywords.iter().all(|k| haystack.contains(k.as_str()))
    }
}

/// Lowercased title, body fields and tags, one per line
///
/// Keywords never contain whitespace, so a keyword cannot straddle two fields.
fn searchable_text(item: &Item) -> String {
    let mut parts: Vec<&str> = vec![item.title.as_str()];
    parts.extend(item.content.as_deref());
    parts.extend(item.description.as_deref());
    parts.extend(item.tags.iter().map(String::as_str));
    parts.join("\n").to_lowercase()
}

/// Zero or more selected tags, OR-combined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: BTreeSet<String>,
}

impl TagSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a tag in or out of the selection; returns whether it is now selected
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.is_empty() || self.tags.iter().any(|t| item.has_tag(t))
    }

    /// Number of selected tags the item carries
    #[must_use]
    pub fn overlap(&self, item: &Item) -> usize {
        self.tags.iter().filter(|t| item.has_tag(t)).count()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Combined search text and tag selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub query: Query,
    pub tags: TagSelection,
}

impl Filter {
    #[must_use]
    pub const fn new(query: Query, tags: TagSelection) -> Self {
        Self { query, tags }
    }

    /// A filter is active when there is search text or a selected tag
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.tags.is_empty()
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.query.matches(item) && self.tags.matches(item)
    }
}

/// Convenience form of [`Filter::matches`]
#[must_use]
pub fn matches(item: &Item, query: &str, tags: &TagSelection) -> bool {
    Query::new(query).matches(item) && tags.matches(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RawRecord};
    use crate::testing::item;

    fn article(title: &str, content: &str, tags: &[&str]) -> Item {
        Item::from_raw(
            Category::KnowledgeArticles,
            RawRecord {
                title: Some(title.into()),
                content: Some(content.into()),
                tags: Some(tags.iter().map(|t| (*t).to_string()).collect()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_empty_query_and_selection_match_everything() {
        let none = TagSelection::new();
        assert!(matches(&article("A", "", &[]), "", &none));
        assert!(matches(&article("A", "", &[]), "   ", &none));
    }

    #[test]
    fn test_every_keyword_must_match() {
        let doc = article("Foo guide", "all about BAR", &[]);
        let none = TagSelection::new();

        assert!(matches(&doc, "foo bar", &none));
        assert!(matches(&doc, "FOO", &none));
        assert!(!matches(&doc, "foo baz", &none));
    }

    #[test]
    fn test_keywords_match_tags_and_description() {
        let doc = Item::from_raw(
            Category::Downloads,
            RawRecord {
                title: Some("Installer".into()),
                description: Some("Windows build".into()),
                tags: Some(vec!["Setup".into()]),
                ..Default::default()
            },
        );
        let none = TagSelection::new();

        assert!(matches(&doc, "windows setup", &none));
        assert!(matches(&doc, "installer", &none));
    }

    #[test]
    fn test_keyword_does_not_span_fields() {
        let doc = article("foo", "bar", &[]);
        assert!(!matches(&doc, "foobar", &TagSelection::new()));
    }

    #[test]
    fn test_tag_selection_is_or() {
        let x = article("A", "", &["x"]);
        let y = article("B", "", &["y"]);
        let z = article("C", "", &["z"]);

        let only_x: TagSelection = ["x"].into_iter().collect();
        assert!(matches(&x, "", &only_x));
        assert!(!matches(&y, "", &only_x));

        let x_or_y: TagSelection = ["x", "y"].into_iter().collect();
        assert!(matches(&x, "", &x_or_y));
        assert!(matches(&y, "", &x_or_y));
        assert!(!matches(&z, "", &x_or_y));
    }

    #[test]
    fn test_untagged_item_never_matches_selection() {
        let untagged = item(Category::Updates, "bare", None, false, &[]);
        let selection: TagSelection = ["x"].into_iter().collect();
        assert!(!selection.matches(&untagged));
    }

    #[test]
    fn test_tag_match_is_exact() {
        let doc = article("A", "", &["Rust"]);
        let selection: TagSelection = ["rust"].into_iter().collect();
        assert!(!selection.matches(&doc));
    }

    #[test]
    fn test_query_and_tags_combine_with_and() {
        let doc = article("Alpha", "", &["x"]);
        let y: TagSelection = ["y"].into_iter().collect();
        let x: TagSelection = ["x"].into_iter().collect();

        assert!(!matches(&doc, "alpha", &y));
        assert!(matches(&doc, "alpha", &x));
        assert!(!matches(&doc, "beta", &x));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = TagSelection::new();
        assert!(selection.toggle("x"));
        assert!(selection.contains("x"));
        assert!(!selection.toggle("x"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_filter_activity() {
        assert!(!Filter::default().is_active());
        assert!(!Filter::new(Query::new("  "), TagSelection::new()).is_active());
        assert!(Filter::new(Query::new("a"), TagSelection::new()).is_active());
        assert!(Filter::new(Query::default(), ["x"].into_iter().collect()).is_active());
    }
}
