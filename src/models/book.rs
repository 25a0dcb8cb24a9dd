use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN: &str = "Unknown";

/// Endpoint-agnostic book record handed to presentation code.
///
/// `title` and `author` are always populated; every other field may carry a
/// fallback value or be null. Field names are camelCase so that persisted
/// favorites stay readable by older front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalBook {
    pub id: String,
    /// Stable catalog identifier, e.g. `/works/OL1234W`
    pub key: String,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub description: String,
    pub subjects: Vec<String>,
    pub first_publish_date: String,
    pub language: String,
    pub ebook_access: Option<String>,
    /// Provenance tag: endpoint family or listing that produced the record
    pub source_endpoint: String,
}

impl Default for CanonicalBook {
    fn default() -> Self {
        Self {
            id: String::new(),
            key: String::new(),
            title: UNKNOWN_TITLE.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            cover_image: None,
            description: NO_DESCRIPTION.to_string(),
            subjects: Vec::new(),
            first_publish_date: UNKNOWN.to_string(),
            language: UNKNOWN.to_string(),
            ebook_access: None,
            source_endpoint: String::new(),
        }
    }
}

/// Extract the catalog id from a key.
///
/// `/works/OL1234W` -> `OL1234W`; keys without a slash are returned as-is.
pub fn extract_book_id(key: &str) -> String {
    match key.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => key.trim_matches('/').to_string(),
    }
}
