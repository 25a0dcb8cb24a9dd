//! Book Service - detail, popular listing and favorites, without the HTTP layer

use crate::domain::{CatalogError, CatalogSource};
use crate::models::{CanonicalBook, FavoritesCollection};
use crate::modules::normalizer::{Normalizer, RecordSource};
use crate::services::store::{Action, SharedStore};

/// Fetch and normalize one work, resolving a referenced author if needed.
///
/// Fails only with `NotFound`; a failed author lookup degrades to
/// "Unknown Author".
pub async fn get_book(
    catalog: &dyn CatalogSource,
    normalizer: &Normalizer,
    id: &str,
) -> Result<CanonicalBook, CatalogError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CatalogError::NotFound);
    }

    let fetched = catalog.fetch_work(id).await?;

    let normalized = normalizer
        .normalize_work(&fetched.payload, fetched.endpoint, id)
        .ok_or(CatalogError::NotFound)?;

    let mut book = normalized.book;
    if let Some(author_ref) = normalized.author_ref {
        tracing::debug!("Resolving author {} for {}", author_ref, id);
        book.author = catalog.fetch_author(&author_ref).await;
    }

    Ok(book)
}

pub async fn popular_books(
    catalog: &dyn CatalogSource,
    normalizer: &Normalizer,
    limit: usize,
) -> Result<Vec<CanonicalBook>, CatalogError> {
    let works = catalog.trending(limit).await?;
    Ok(normalizer.normalize_records(&works, RecordSource::Trending))
}

pub async fn list_favorites(store: &SharedStore) -> FavoritesCollection {
    store.read().await.favorites().clone()
}

pub async fn is_favorite(store: &SharedStore, key: &str) -> bool {
    store.read().await.favorites().contains(key)
}

/// Returns whether the book was newly added
pub async fn add_favorite(store: &SharedStore, book: CanonicalBook) -> bool {
    let mut guard = store.write().await;
    let before = guard.favorites().len();
    guard.dispatch(Action::FavoriteAdded(book));
    guard.favorites().len() != before
}

/// Returns whether anything was removed
pub async fn remove_favorite(store: &SharedStore, key: &str) -> bool {
    let mut guard = store.write().await;
    let before = guard.favorites().len();
    guard.dispatch(Action::FavoriteRemoved {
        key: key.to_string(),
    });
    guard.favorites().len() != before
}

/// Flip membership; returns whether the book is a favorite afterwards
pub async fn toggle_favorite(store: &SharedStore, book: CanonicalBook) -> bool {
    let mut guard = store.write().await;
    if guard.favorites().contains(&book.key) {
        guard.dispatch(Action::FavoriteRemoved { key: book.key });
        false
    } else {
        guard.dispatch(Action::FavoriteAdded(book));
        true
    }
}
