use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::infrastructure::AppState;
use crate::models::CanonicalBook;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct FavoriteKeyQuery {
    pub key: Option<String>,
}

/// `/works/OL1W` stays as-is; a bare `OL1W` is taken to be a work id
fn normalize_key(raw: &str) -> String {
    let key = raw.trim();
    if key.contains('/') {
        key.to_string()
    } else {
        format!("/works/{}", key)
    }
}

fn missing_key() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "A favorite needs a non-empty key" })),
    )
        .into_response()
}

pub async fn list_favorites(State(state): State<AppState>) -> impl IntoResponse {
    let favorites = services::list_favorites(&state.store).await;
    Json(json!({ "total": favorites.len(), "favorites": favorites }))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(book): Json<CanonicalBook>,
) -> Response {
    if book.key.trim().is_empty() {
        return missing_key();
    }

    let key = book.key.clone();
    let added = services::add_favorite(&state.store, book).await;
    let status = if added {
        tracing::info!("Added favorite {}", key);
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    (status, Json(json!({ "added": added, "key": key }))).into_response()
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Query(params): Query<FavoriteKeyQuery>,
) -> Response {
    let Some(raw) = params.key.filter(|k| !k.trim().is_empty()) else {
        return missing_key();
    };

    let key = normalize_key(&raw);
    let removed = services::remove_favorite(&state.store, &key).await;
    if removed {
        tracing::info!("Removed favorite {}", key);
    }

    (StatusCode::OK, Json(json!({ "removed": removed, "key": key }))).into_response()
}

pub async fn favorite_status(
    State(state): State<AppState>,
    Query(params): Query<FavoriteKeyQuery>,
) -> Response {
    let Some(raw) = params.key.filter(|k| !k.trim().is_empty()) else {
        return missing_key();
    };

    let key = normalize_key(&raw);
    let favorite = services::is_favorite(&state.store, &key).await;
    (StatusCode::OK, Json(json!({ "favorite": favorite, "key": key }))).into_response()
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(book): Json<CanonicalBook>,
) -> Response {
    if book.key.trim().is_empty() {
        return missing_key();
    }

    let key = book.key.clone();
    let favorite = services::toggle_favorite(&state.store, book).await;
    (
        StatusCode::OK,
        Json(json!({ "favorite": favorite, "key": key })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("/works/OL1W"), "/works/OL1W");
        assert_eq!(normalize_key(" OL1W "), "/works/OL1W");
        assert_eq!(normalize_key("/books/OL7M"), "/books/OL7M");
    }
}
