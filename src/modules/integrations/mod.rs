pub mod openlibrary;

pub use openlibrary::{CatalogSettings, OpenLibraryClient};
