//! Services Layer
//!
//! State container plus the operations that drive it. Services are called by
//! the Axum handlers but carry no HTTP types.

pub mod book_service;
pub mod search_service;
pub mod store;

// Re-export for convenience
pub use book_service::*;
pub use search_service::{clear_results, ensure_search, result_books, run_search};
pub use store::{Action, BooksState, SearchPhase, SearchState, SharedStore, Store};
