//! Collection loading
//!
//! Fetches the three collections concurrently, stamps each record with its
//! category and merges them into one [`ItemSet`]. Nothing is merged unless
//! all three fetches succeed, and nothing is retried.

pub mod error;
pub mod source;

pub use error::{FetchError, LoadError};
pub use source::{CollectionSource, DirSource, HttpSource, MemorySource};

use crate::models::{Category, Identity, Item, ItemSet};
use futures::future::try_join3;
use std::collections::HashMap;

/// Options controlling how records are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail the load when two items share an identity instead of warning
    pub strict_identities: bool,
}

/// Load and merge all collections from `source`
///
/// # Errors
///
/// Returns `LoadError::Collection` naming the first category whose fetch
/// failed, or `LoadError::DuplicateIdentity` under strict identities.
pub async fn load(
    source: &dyn CollectionSource,
    options: LoadOptions,
) -> Result<ItemSet, LoadError> {
    tracing::info!(source = %source.describe(), "loading collections");

    let (updates, articles, downloads) = try_join3(
        fetch_category(source, Category::Updates),
        fetch_category(source, Category::KnowledgeArticles),
        fetch_category(source, Category::Downloads),
    )
    .await
    .inspect_err(|e| tracing::error!(error = %e, "collection load failed"))?;

    let items: Vec<Item> = updates.into_iter().chain(articles).chain(downloads).collect();
    check_identities(&items, options)?;

    tracing::info!(items = items.len(), "collections merged");
    Ok(ItemSet::new(items))
}

async fn fetch_category(
    source: &dyn CollectionSource,
    category: Category,
) -> Result<Vec<Item>, LoadError> {
    let records = source
        .fetch(category.as_str())
        .await
        .map_err(|source| LoadError::Collection { category, source })?;

    tracing::debug!(%category, records = records.len(), "collection fetched");

    Ok(records
        .into_iter()
        .map(|raw| Item::from_raw(category, raw))
        .collect())
}

/// Identities seen more than once, in first-seen order
#[must_use]
pub fn duplicate_identities(items: &[Item]) -> Vec<Identity> {
    let mut seen: HashMap<Identity, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for item in items {
        let count = seen.entry(item.identity()).or_default();
        *count += 1;
        if *count == 2 {
            duplicates.push(item.identity());
        }
    }

    duplicates
}

fn check_identities(items: &[Item], options: LoadOptions) -> Result<(), LoadError> {
    let duplicates = duplicate_identities(items);

    if options.strict_identities
        && let Some(identity) = duplicates.first()
    {
        return Err(LoadError::DuplicateIdentity {
            identity: identity.clone(),
        });
    }

    for identity in &duplicates {
        tracing::warn!(%identity, "items share an identity; their bookmark flag is shared");
    }

    Ok(())
}
