//! Port definitions
//!
//! These traits define the contract for the external catalog and for the
//! favorites slot. Implementations live in the modules and infrastructure layers.

use async_trait::async_trait;
use serde_json::Value;

use super::{CatalogError, PersistenceError};
use crate::models::{FavoritesCollection, RawResultRecord, ResultPage};
use crate::modules::normalizer::EndpointFamily;

/// A detail payload together with the endpoint that produced it
#[derive(Debug, Clone)]
pub struct FetchedWork {
    /// Unwrapped, non-empty JSON object
    pub payload: Value,
    /// Family of the first candidate endpoint that answered
    pub endpoint: EndpointFamily,
    /// Exact URL that answered
    pub url: String,
}

/// Read-only access to the book catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Run a free-text search. A single request, never retried.
    async fn search(&self, query: &str) -> Result<ResultPage, CatalogError>;

    /// Fetch a work by its opaque id, walking the configured candidate endpoints.
    /// Returns `NotFound` when every candidate fails.
    async fn fetch_work(&self, id: &str) -> Result<FetchedWork, CatalogError>;

    /// Resolve an author reference to a display name.
    /// Never fails: unresolvable references yield "Unknown Author".
    async fn fetch_author(&self, author_ref: &str) -> String;

    /// Today's trending works, with keyless and titleless entries removed
    async fn trending(&self, limit: usize) -> Result<Vec<RawResultRecord>, CatalogError>;
}

/// Durable storage for the favorites collection (whole-collection replace)
pub trait FavoritesStorage: Send + Sync {
    /// Read the persisted collection. An absent slot is an empty collection.
    fn load(&self) -> Result<FavoritesCollection, PersistenceError>;

    /// Overwrite the persisted collection
    fn save(&self, favorites: &FavoritesCollection) -> Result<(), PersistenceError>;

    /// Load the persisted collection, treating any failure as "no favorites yet"
    fn load_or_empty(&self) -> FavoritesCollection {
        match self.load() {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Ignoring unreadable favorites storage: {}", e);
                FavoritesCollection::new()
            }
        }
    }
}
