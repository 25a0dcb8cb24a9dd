//! Search State Store
//!
//! One explicit state container, one `Action` enum, one reducer. All mutation
//! of search state and favorites goes through `Store::dispatch`; favorites are
//! written to durable storage after every change.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::FavoritesStorage;
use crate::models::{CanonicalBook, FavoritesCollection, ResultPage};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Option<ResultPage>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Lifecycle of a single search: `Idle -> Loading -> {Succeeded, Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl SearchState {
    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if self.results.is_some() {
            SearchPhase::Succeeded
        } else {
            SearchPhase::Idle
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooksState {
    pub search: SearchState,
    pub favorites: FavoritesCollection,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Prior results stay visible until the request resolves
    SearchRequested { query: String },
    /// Also used to hydrate results fetched ahead of time
    SearchSucceeded { results: ResultPage, query: String },
    /// Prior results are left untouched
    SearchFailed { message: String },
    ResultsCleared,
    FavoriteAdded(CanonicalBook),
    FavoriteRemoved { key: String },
    /// Start-up load; not written back
    FavoritesLoaded(FavoritesCollection),
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PersistFavorites,
}

pub fn reduce(state: &mut BooksState, action: Action) -> Effect {
    match action {
        Action::SearchRequested { query } => {
            tracing::debug!("Search requested: {:?}", query);
            state.search.loading = true;
            state.search.error = None;
            Effect::None
        }
        Action::SearchSucceeded { results, query } => {
            state.search.results = Some(results);
            state.search.query = query;
            state.search.loading = false;
            state.search.error = None;
            Effect::None
        }
        Action::SearchFailed { message } => {
            state.search.loading = false;
            state.search.error = Some(message);
            Effect::None
        }
        Action::ResultsCleared => {
            state.search.results = None;
            state.search.query.clear();
            Effect::None
        }
        Action::FavoriteAdded(book) => {
            if state.favorites.insert(book) {
                Effect::PersistFavorites
            } else {
                Effect::None
            }
        }
        Action::FavoriteRemoved { key } => {
            if state.favorites.remove(&key) {
                Effect::PersistFavorites
            } else {
                Effect::None
            }
        }
        Action::FavoritesLoaded(favorites) => {
            state.favorites = favorites;
            Effect::None
        }
    }
}

pub struct Store {
    state: BooksState,
    storage: Arc<dyn FavoritesStorage>,
}

pub type SharedStore = Arc<RwLock<Store>>;

impl Store {
    /// Create the store and load persisted favorites once
    pub fn new(storage: Arc<dyn FavoritesStorage>) -> Self {
        let favorites = storage.load_or_empty();
        tracing::info!("Loaded {} favorites", favorites.len());

        let mut store = Self {
            state: BooksState::default(),
            storage,
        };
        store.dispatch(Action::FavoritesLoaded(favorites));
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn search(&self) -> &SearchState {
        &self.state.search
    }

    pub fn favorites(&self) -> &FavoritesCollection {
        &self.state.favorites
    }

    pub fn dispatch(&mut self, action: Action) {
        if reduce(&mut self.state, action) == Effect::PersistFavorites {
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state.favorites) {
            tracing::warn!("Failed to persist favorites: {}", e);
        }
    }
}
