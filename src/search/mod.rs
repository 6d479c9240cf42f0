//! Filtering and ranking over an in-memory item set
//!
//! Pure data operations with no knowledge of how results are presented:
//! - `predicate`: keyword and tag matching
//! - `rank`: browse and search ordering, relevance scores

pub mod predicate;
pub mod rank;

pub use predicate::{Filter, Query, TagSelection, matches};
pub use rank::{Ranked, browse_order, relevance, search_order};
