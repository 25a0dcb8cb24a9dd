use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::AppState;
use crate::models::{CanonicalBook, ResultPage};
use crate::services::{self, SearchPhase, SearchState};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search state as seen by the client. A failed search is still a 200:
/// the error travels in `error` next to whatever results were shown before.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Option<ResultPage>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SearchPhase,
}

impl From<SearchState> for SearchResponse {
    fn from(state: SearchState) -> Self {
        let phase = state.phase();
        Self {
            query: state.query,
            results: state.results,
            loading: state.loading,
            error: state.error,
            phase,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksResponse {
    pub query: String,
    pub books: Vec<CanonicalBook>,
    pub total_found: u64,
    pub error: Option<String>,
}

impl SearchQuery {
    /// Trimmed, non-empty query text
    fn text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// No query means nothing to show; the store is left alone
async fn search_for(state: &AppState, params: &SearchQuery) -> SearchState {
    match params.text() {
        Some(query) => {
            services::ensure_search(&state.store, state.catalog.as_ref(), query).await
        }
        None => SearchState::default(),
    }
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let search = search_for(&state, &params).await;
    (StatusCode::OK, Json(SearchResponse::from(search)))
}

/// Same flow as `search_books`, rendered as canonical records
pub async fn search_result_books(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let search = search_for(&state, &params).await;
    let books = services::result_books(&search, &state.normalizer);

    (
        StatusCode::OK,
        Json(SearchBooksResponse {
            query: search.query,
            total_found: search.results.map(|r| r.total_found).unwrap_or(0),
            books,
            error: search.error,
        }),
    )
}

pub async fn clear_results(State(state): State<AppState>) -> impl IntoResponse {
    let search = services::clear_results(&state.store).await;
    (StatusCode::OK, Json(SearchResponse::from(search)))
}
