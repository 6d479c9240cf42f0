//! Persistent per-item bookmark flags
//!
//! The whole map lives under a single slot of a sled tree:
//! - tree `bookmarks`, key `bookmarks`
//! - value: JSON object mapping identity → bool
//!
//! The map is read once when the store opens. `is_bookmarked` reads the
//! in-memory copy; every `toggle` rewrites and flushes the full map.

pub mod error;

pub use error::BookmarkError;

use crate::models::Identity;
use sled::{Db, Tree};
use std::collections::BTreeMap;
use std::path::Path;

const TREE: &str = "bookmarks";
const SLOT: &str = "bookmarks";

/// Bookmark flags keyed by item identity
pub struct BookmarkStore {
    db: Db,
    tree: Tree,
    flags: BTreeMap<Identity, bool>,
}

impl BookmarkStore {
    /// Opens or creates a bookmark store at the specified path
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError` if the database cannot be opened or the stored
    /// map cannot be decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BookmarkError> {
        Self::from_db(sled::open(path)?)
    }

    /// Opens a store that is discarded when dropped
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError` if the temporary database cannot be created.
    pub fn temporary() -> Result<Self, BookmarkError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> Result<Self, BookmarkError> {
        let tree = db.open_tree(TREE)?;
        let flags = match tree.get(SLOT)? {
            Some(value) => serde_json::from_slice(&value)?,
            None => BTreeMap::new(),
        };
        tracing::debug!(entries = flags.len(), "bookmarks loaded");
        Ok(Self { db, tree, flags })
    }

    /// Flip the flag for `identity` and persist the full map
    ///
    /// Returns the new flag value.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError` if the map cannot be written. The in-memory
    /// flag is rolled back in that case.
    pub fn toggle(&mut self, identity: &Identity) -> Result<bool, BookmarkError> {
        let previous = self.flags.get(identity).copied();
        let flag = !previous.unwrap_or(false);
        self.flags.insert(identity.clone(), flag);

        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.flags.insert(identity.clone(), old),
                None => self.flags.remove(identity),
            };
            return Err(e);
        }

        tracing::debug!(%identity, bookmarked = flag, "bookmark toggled");
        Ok(flag)
    }

    #[must_use]
    pub fn is_bookmarked(&self, identity: &Identity) -> bool {
        self.flags.get(identity).copied().unwrap_or(false)
    }

    /// Identities currently flagged, sorted
    pub fn bookmarked(&self) -> impl Iterator<Item = &Identity> {
        self.flags
            .iter()
            .filter_map(|(identity, flag)| flag.then_some(identity))
    }

    fn persist(&self) -> Result<(), BookmarkError> {
        let value = serde_json::to_vec(&self.flags)?;
        self.tree.insert(SLOT, value)?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::testing::TestStore;

    fn identity(title: &str) -> Identity {
        Identity::new(Category::Downloads, title)
    }

    #[test]
    fn test_new_store_has_no_bookmarks() {
        let store = TestStore::new();
        let bookmarks = store.open();

        assert!(!bookmarks.is_bookmarked(&identity("Installer")));
        assert_eq!(bookmarks.bookmarked().count(), 0);
    }

    #[test]
    fn test_toggle_flips_flag() {
        let store = TestStore::new();
        let mut bookmarks = store.open();
        let id = identity("Installer");

        assert!(bookmarks.toggle(&id).unwrap());
        assert!(bookmarks.is_bookmarked(&id));
        assert!(!bookmarks.toggle(&id).unwrap());
        assert!(!bookmarks.is_bookmarked(&id));
    }

    #[test]
    fn test_toggle_survives_reopen() {
        let store = TestStore::new();
        let id = identity("Installer");

        {
            let mut bookmarks = store.open();
            bookmarks.toggle(&id).unwrap();
        }

        let reopened = store.open();
        assert!(reopened.is_bookmarked(&id));
        assert_eq!(reopened.bookmarked().collect::<Vec<_>>(), vec![&id]);
    }

    #[test]
    fn test_unflagged_entries_are_not_listed() {
        let store = TestStore::new();
        let mut bookmarks = store.open();
        let kept = identity("Kept");
        let dropped = identity("Dropped");

        bookmarks.toggle(&kept).unwrap();
        bookmarks.toggle(&dropped).unwrap();
        bookmarks.toggle(&dropped).unwrap();

        assert_eq!(bookmarks.bookmarked().collect::<Vec<_>>(), vec![&kept]);
    }

    #[test]
    fn test_persisted_format_is_flat_json_map() {
        let store = TestStore::new();
        {
            let mut bookmarks = store.open();
            bookmarks.toggle(&identity("Installer")).unwrap();
        }

        let db = sled::open(store.path()).unwrap();
        let raw = db.open_tree(TREE).unwrap().get(SLOT).unwrap().unwrap();
        let map: BTreeMap<String, bool> = serde_json::from_slice(&raw).unwrap();

        assert_eq!(map.get("downloads-Installer"), Some(&true));
    }

    #[test]
    fn test_temporary_store_works() {
        let mut bookmarks = BookmarkStore::temporary().unwrap();
        let id = identity("Scratch");
        assert!(bookmarks.toggle(&id).unwrap());
    }
}
