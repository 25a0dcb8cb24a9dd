//! Application state containing the catalog, the normalizer and the store

use std::sync::Arc;

use crate::config::Config;
use crate::domain::{CatalogError, CatalogSource, FavoritesStorage};
use crate::infrastructure::favorites_storage::JsonFileStorage;
use crate::modules::integrations::OpenLibraryClient;
use crate::modules::normalizer::Normalizer;
use crate::services::store::{SharedStore, Store};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// External catalog
    pub catalog: Arc<dyn CatalogSource>,
    /// Record normalizer (holds the covers base URL)
    pub normalizer: Arc<Normalizer>,
    /// Search state and favorites; the single writer for both
    pub store: SharedStore,
    /// Default size of the popular listing
    pub trending_limit: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        normalizer: Normalizer,
        storage: Arc<dyn FavoritesStorage>,
    ) -> Self {
        Self {
            catalog,
            normalizer: Arc::new(normalizer),
            store: Store::new(storage).into_shared(),
            trending_limit: 12,
        }
    }

    pub fn with_trending_limit(mut self, limit: usize) -> Self {
        self.trending_limit = limit.max(1);
        self
    }

    /// Wire the Open Library client and the JSON favorites file from config
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let catalog = OpenLibraryClient::new(config.catalog_settings())?;
        let storage = JsonFileStorage::new(config.favorites_path.clone());
        tracing::info!("Favorites slot: {}", storage.path().display());

        Ok(Self::new(
            Arc::new(catalog),
            Normalizer::new(config.covers_base_url.clone()),
            Arc::new(storage),
        )
        .with_trending_limit(config.trending_limit))
    }
}
