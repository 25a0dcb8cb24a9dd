use serde::{Deserialize, Serialize};

use super::book::CanonicalBook;

/// Ordered favorites list, unique by `key`.
///
/// Deserialization drops later duplicates so a hand-edited slot cannot break
/// the uniqueness invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CanonicalBook>", into = "Vec<CanonicalBook>")]
pub struct FavoritesCollection {
    books: Vec<CanonicalBook>,
}

impl FavoritesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.books.iter().any(|b| b.key == key)
    }

    /// Append unless the key is already present. Returns whether it was added.
    pub fn insert(&mut self, book: CanonicalBook) -> bool {
        if self.contains(&book.key) {
            return false;
        }
        self.books.push(book);
        true
    }

    /// Remove by key. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.key != key);
        self.books.len() != before
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

}

impl From<Vec<CanonicalBook>> for FavoritesCollection {
    fn from(books: Vec<CanonicalBook>) -> Self {
        let mut collection = Self::new();
        for book in books {
            collection.insert(book);
        }
        collection
    }
}

impl From<FavoritesCollection> for Vec<CanonicalBook> {
    fn from(collection: FavoritesCollection) -> Self {
        collection.books
    }
}
