//! Tag vocabulary derived from an item set
//!
//! Tags compare by exact, case-sensitive string equality. The index is a
//! value: it is rebuilt from scratch whenever the item set is replaced and is
//! never patched in place.

use crate::models::ItemSet;
use std::collections::BTreeMap;

/// Sorted, deduplicated union of every item's tags with usage counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    counts: BTreeMap<String, usize>,
}

impl TagIndex {
    #[must_use]
    pub fn build(items: &ItemSet) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for tag in items.iter().flat_map(|item| item.tags.iter()) {
            *counts.entry(tag.clone()).or_default() += 1;
        }
        Self { counts }
    }

    /// Tags in sorted order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Tags paired with the number of items carrying them
    pub fn with_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
