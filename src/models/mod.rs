pub mod book;
pub mod favorites;
pub mod lenient;
pub mod search;

pub use book::{CanonicalBook, extract_book_id};
pub use favorites::FavoritesCollection;
pub use search::{RawResultRecord, ResultPage, TrendingPage};
