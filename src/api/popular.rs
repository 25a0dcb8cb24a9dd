use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::infrastructure::AppState;
use crate::services;

const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<usize>,
}

pub async fn popular_books(
    State(state): State<AppState>,
    Query(params): Query<PopularQuery>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(state.trending_limit)
        .clamp(1, MAX_LIMIT);

    match services::popular_books(state.catalog.as_ref(), &state.normalizer, limit).await {
        Ok(books) => (
            StatusCode::OK,
            Json(json!({ "books": books, "total": books.len() })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error fetching popular books: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Failed to load popular books." })),
            )
                .into_response()
        }
    }
}
