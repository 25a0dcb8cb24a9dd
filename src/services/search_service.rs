//! Search orchestration: keeps the store in step with the requested query.

use crate::domain::CatalogSource;
use crate::models::CanonicalBook;
use crate::modules::normalizer::{Normalizer, RecordSource};
use crate::services::store::{Action, SearchState, SharedStore};

/// Make the store reflect `query`.
///
/// An empty query leaves the state alone. A query that already has fresh
/// results is answered from the store; anything else hits the catalog.
pub async fn ensure_search(
    store: &SharedStore,
    catalog: &dyn CatalogSource,
    query: &str,
) -> SearchState {
    let query = query.trim();
    if query.is_empty() {
        return store.read().await.search().clone();
    }

    {
        let guard = store.read().await;
        let current = guard.search();
        if current.query == query
            && current.results.is_some()
            && current.error.is_none()
            && !current.loading
        {
            tracing::debug!("Serving {:?} from the store", query);
            return current.clone();
        }
    }

    run_search(store, catalog, query).await
}

/// Always fetch. The lock is released while the request is in flight, so
/// whichever request resolves last determines the stored state.
pub async fn run_search(
    store: &SharedStore,
    catalog: &dyn CatalogSource,
    query: &str,
) -> SearchState {
    store.write().await.dispatch(Action::SearchRequested {
        query: query.to_string(),
    });

    let action = match catalog.search(query).await {
        Ok(results) => Action::SearchSucceeded {
            results,
            query: query.to_string(),
        },
        Err(e) => {
            tracing::warn!("Search for {:?} failed: {}", query, e);
            Action::SearchFailed {
                message: e.to_string(),
            }
        }
    };

    let mut guard = store.write().await;
    guard.dispatch(action);
    guard.search().clone()
}

pub async fn clear_results(store: &SharedStore) -> SearchState {
    let mut guard = store.write().await;
    guard.dispatch(Action::ResultsCleared);
    guard.search().clone()
}

/// Results of a search snapshot as canonical records (keyless docs dropped)
pub fn result_books(search: &SearchState, normalizer: &Normalizer) -> Vec<CanonicalBook> {
    search
        .results
        .as_ref()
        .map(|page| normalizer.normalize_records(&page.items, RecordSource::Search))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawResultRecord, ResultPage};

    #[test]
    fn test_result_books_follow_the_snapshot() {
        let search = SearchState {
            query: "dune".to_string(),
            results: Some(ResultPage {
                items: vec![
                    RawResultRecord {
                        key: Some("/works/OL1234W".to_string()),
                        title: Some("Dune".to_string()),
                        ..Default::default()
                    },
                    RawResultRecord {
                        title: Some("Keyless".to_string()),
                        ..Default::default()
                    },
                ],
                total_found: 2,
            }),
            ..Default::default()
        };

        let books = result_books(&search, &Normalizer::default());
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "OL1234W");
        assert_eq!(books[0].source_endpoint, "search");

        assert!(result_books(&SearchState::default(), &Normalizer::default()).is_empty());
    }
}
