//! Ordering policy
//!
//! Pin status always dominates. In browse mode the remaining key is date,
//! newest first. In search mode relevance comes before date. Missing dates
//! order as the oldest possible date. Sorts are stable, so equal keys keep
//! source order and repeated renders are identical.

use super::predicate::Filter;
use crate::models::Item;
use std::cmp::{Ordering, Reverse};

/// Points for the untokenized query appearing in the title
pub const TITLE_WEIGHT: u32 = 3;
/// Points for the untokenized query appearing in the body
pub const BODY_WEIGHT: u32 = 2;
/// Points for each selected tag the item carries
pub const TAG_WEIGHT: u32 = 1;

/// A search hit with its relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked<'a> {
    pub item: &'a Item,
    pub score: u32,
}

/// Relevance of `item` for `filter`
#[must_use]
pub fn relevance(item: &Item, filter: &Filter) -> u32 {
    let phrase = filter.query.phrase();
    let mut score = 0;

    if !phrase.is_empty() {
        if item.title.to_lowercase().contains(phrase) {
            score += TITLE_WEIGHT;
        }
        let in_body = [item.content.as_deref(), item.description.as_deref()]
            .into_iter()
            .flatten()
            .any(|body| body.to_lowercase().contains(phrase));
        if in_body {
            score += BODY_WEIGHT;
        }
    }

    let tag_hits = u32::try_from(filter.tags.overlap(item)).unwrap_or(u32::MAX);
    score.saturating_add(tag_hits.saturating_mul(TAG_WEIGHT))
}

fn pinned_first(a: &Item, b: &Item) -> Ordering {
    b.pinned.cmp(&a.pinned)
}

fn newest_first(a: &Item, b: &Item) -> Ordering {
    b.date_key().cmp(&a.date_key())
}

/// Pinned items first, then newest first within each group
#[must_use]
pub fn browse_order<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a Item> {
    let mut ordered: Vec<&Item> = items.into_iter().collect();
    ordered.sort_by(|a, b| pinned_first(a, b).then_with(|| newest_first(a, b)));
    ordered
}

/// Matching items scored and ordered: pinned, then score, then date
#[must_use]
pub fn search_order<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    filter: &Filter,
) -> Vec<Ranked<'a>> {
    let mut hits: Vec<Ranked<'a>> = items
        .into_iter()
        .filter(|item| filter.matches(item))
        .map(|item| Ranked {
            item,
            score: relevance(item, filter),
        })
        .collect();

    hits.sort_by(|a, b| {
        pinned_first(a.item, b.item)
            .then_with(|| Reverse(a.score).cmp(&Reverse(b.score)))
            .then_with(|| newest_first(a.item, b.item))
    });
    hits
}
