//! Core data types shared by every layer
//!
//! Raw records arrive loosely typed from a [`CollectionSource`](crate::loader::CollectionSource)
//! and are normalized exactly once into [`Item`]s. After that point the
//! [`ItemSet`] is read-only: filtering and ranking always start from the full
//! set and never from a previously filtered subset.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Placeholder shown when a record has no title
pub const UNTITLED: &str = "Untitled";

/// Placeholder shown when a record has neither `content` nor `description`
pub const NO_CONTENT: &str = "No content available";

/// Origin collection of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Updates,
    KnowledgeArticles,
    Downloads,
}

impl Category {
    /// All categories in tab order
    pub const ALL: [Self; 3] = [Self::Updates, Self::KnowledgeArticles, Self::Downloads];

    /// Collection name, also used as container id and identity prefix
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updates => "updates",
            Self::KnowledgeArticles => "knowledge-articles",
            Self::Downloads => "downloads",
        }
    }

    /// Human readable tab label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Updates => "Updates",
            Self::KnowledgeArticles => "Knowledge Articles",
            Self::Downloads => "Downloads",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}' (expected updates, knowledge-articles or downloads)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "updates" => Ok(Self::Updates),
            "knowledge-articles" | "knowledge" | "articles" => Ok(Self::KnowledgeArticles),
            "downloads" => Ok(Self::Downloads),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A record as published by a collection source
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    pub file: Option<String>,
}

/// Key used to associate bookmarks and rendered nodes with an item
///
/// Formed as `<category>-<title>`. Not guaranteed unique: two items sharing
/// a category and a title share one identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    #[must_use]
    pub fn new(category: Category, title: &str) -> Self {
        Self(format!("{}-{title}", category.as_str()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized unit of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub category: Category,
    pub title: String,
    pub content: Option<String>,
    pub description: Option<String>,
    /// `None` orders as the oldest possible date
    pub date: Option<NaiveDate>,
    pub tags: BTreeSet<String>,
    pub pinned: bool,
    pub file: Option<String>,
}

impl Item {
    /// Normalize a raw record, stamping it with its origin category
    #[must_use]
    pub fn from_raw(category: Category, raw: RawRecord) -> Self {
        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let date = raw.date.as_deref().and_then(|value| {
            let parsed = parse_date(value);
            if parsed.is_none() {
                tracing::warn!(%category, title = %title, date = value, "unparseable date, treating as oldest");
            }
            parsed
        });

        Self {
            category,
            title,
            content: raw.content.filter(|c| !c.is_empty()),
            description: raw.description.filter(|d| !d.is_empty()),
            date,
            tags: raw.tags.unwrap_or_default().into_iter().collect(),
            pinned: raw.pinned.unwrap_or(false),
            file: raw.file.filter(|f| !f.is_empty()),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.category, &self.title)
    }

    /// Display body: long-form content first, then the short description
    #[must_use]
    pub fn body(&self) -> &str {
        self.content
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or(NO_CONTENT)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the item offers a download
    #[must_use]
    pub const fn is_downloadable(&self) -> bool {
        self.file.is_some()
    }

    /// Sort key for dates; missing dates collapse to the epoch
    #[must_use]
    pub fn date_key(&self) -> NaiveDate {
        self.date.unwrap_or(NaiveDate::MIN)
    }

    /// `Posted on June 1, 2024`
    #[must_use]
    pub fn posted_on(&self) -> Option<String> {
        self.date
            .map(|d| format!("Posted on {}", d.format("%B %-d, %Y")))
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// The full, merged collection for a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSet {
    items: Vec<Item>,
}

impl ItemSet {
    #[must_use]
    pub const fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Items of one category in source order
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// First item with the given category and title
    #[must_use]
    pub fn find(&self, category: Category, title: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| i.category == category && i.title == title)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
