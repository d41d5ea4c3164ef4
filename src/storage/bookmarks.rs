/// Per-book bookmark persistence
///
/// Bookmark sets are stored one JSON array of page indices per book, under
/// keys namespaced by book id (`bookmarks_{id}`) so books never collide.
/// Saves are full overwrites of the book's set, not incremental appends;
/// the last writer wins.

use std::collections::BTreeSet;

use crate::catalog::book::BookId;
use crate::error::Result;
use crate::storage::kv::KeyValueStore;

/// Bookmark layer over a host key-value store
#[derive(Debug)]
pub struct Bookmarks<S> {
    store: S,
}

impl<S: KeyValueStore> Bookmarks<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(book_id: &BookId) -> String {
        format!("bookmarks_{}", book_id)
    }

    /// Load the bookmarked page indices for a book.
    ///
    /// A book with nothing persisted yields an empty set; only an underlying
    /// storage fault (or a corrupted record) is an error.
    pub fn load(&self, book_id: &BookId) -> Result<BTreeSet<usize>> {
        match self.store.get(&Self::key(book_id))? {
            Some(raw) => {
                let indices: Vec<usize> = serde_json::from_str(&raw)?;
                Ok(indices.into_iter().collect())
            }
            None => Ok(BTreeSet::new()),
        }
    }

    /// Persist the full bookmark set for a book, replacing whatever was there.
    pub fn save(&mut self, book_id: &BookId, bookmarks: &BTreeSet<usize>) -> Result<()> {
        let encoded = serde_json::to_string(bookmarks)?;
        self.store.set(&Self::key(book_id), &encoded)
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
