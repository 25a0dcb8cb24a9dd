pub mod books;
pub mod favorites;
pub mod health;
pub mod popular;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Search
        .route(
            "/search",
            get(search::search_books).delete(search::clear_results),
        )
        .route("/search/books", get(search::search_result_books))
        // Book detail
        .route("/books/:id", get(books::get_book))
        // Popular
        .route("/popular", get(popular::popular_books))
        // Favorites
        .route(
            "/favorites",
            get(favorites::list_favorites)
                .post(favorites::add_favorite)
                .delete(favorites::remove_favorite),
        )
        .route("/favorites/status", get(favorites::favorite_status))
        .route("/favorites/toggle", post(favorites::toggle_favorite))
        .with_state(state)
}
