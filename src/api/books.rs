use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::CatalogError;
use crate::infrastructure::AppState;
use crate::services;

pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match services::get_book(state.catalog.as_ref(), &state.normalizer, &id).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(CatalogError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found", "id": id })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error fetching book details for {}: {}", id, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string(), "id": id })),
            )
                .into_response()
        }
    }
}
