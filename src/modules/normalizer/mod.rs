//! Record normalization
//!
//! Turns raw catalog JSON (detail payloads from any endpoint family, or
//! search/trending documents) into `CanonicalBook`s. Every field access is
//! defensive: a missing or mistyped value resolves to a fallback and is logged
//! at debug level, never raised.

pub mod endpoint;

pub use endpoint::{AuthorField, EndpointFamily};

use serde_json::Value;

use crate::models::book::{NO_DESCRIPTION, UNKNOWN, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use crate::models::{CanonicalBook, RawResultRecord, extract_book_id};
use endpoint::CoverSource;

pub const DEFAULT_COVERS_BASE_URL: &str = "https://covers.openlibrary.org";
pub const MAX_SUBJECTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Listing a result record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Search,
    Trending,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Search => "search",
            RecordSource::Trending => "trending",
        }
    }
}

/// Output of detail normalization.
///
/// When the payload only references its author, `book.author` holds the
/// fallback and `author_ref` carries the reference to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWork {
    pub book: CanonicalBook,
    pub author_ref: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    covers_base_url: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_COVERS_BASE_URL)
    }
}

impl Normalizer {
    pub fn new(covers_base_url: impl Into<String>) -> Self {
        Self {
            covers_base_url: covers_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `https://covers.openlibrary.org/b/id/<id>-<S|M|L>.jpg`
    pub fn cover_url(&self, cover_id: i64, size: CoverSize) -> String {
        format!(
            "{}/b/id/{}-{}.jpg",
            self.covers_base_url,
            cover_id,
            size.suffix()
        )
    }

    /// Normalize a detail payload produced by `family` for the requested `id`.
    ///
    /// Returns `None` when the payload is not a non-empty object.
    pub fn normalize_work(
        &self,
        payload: &Value,
        family: EndpointFamily,
        id: &str,
    ) -> Option<NormalizedWork> {
        let object = payload.as_object()?;
        if object.is_empty() {
            tracing::debug!(%family, id, "Empty payload, nothing to normalize");
            return None;
        }

        let extractors = family.extractors();

        let title = non_empty_str(payload.get("title")).unwrap_or_else(|| {
            log_miss(family, id, "title");
            UNKNOWN_TITLE.to_string()
        });

        let (author, author_ref) = match (extractors.author)(payload) {
            AuthorField::Inline(name) => (name, None),
            AuthorField::Reference(key) => (UNKNOWN_AUTHOR.to_string(), Some(key)),
            AuthorField::Missing => {
                log_miss(family, id, "author");
                (UNKNOWN_AUTHOR.to_string(), None)
            }
        };

        let cover_image = match (extractors.cover)(payload) {
            Some(CoverSource::Id(cover_id)) => Some(self.cover_url(cover_id, CoverSize::Large)),
            Some(CoverSource::Url(url)) => Some(url),
            None => {
                log_miss(family, id, "cover");
                None
            }
        };

        let description = parse_description((extractors.description)(payload));
        if description == NO_DESCRIPTION {
            log_miss(family, id, "description");
        }

        let first_publish_date = non_empty_str(payload.get("first_publish_date"))
            .or_else(|| non_empty_str(payload.get("publish_date")))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let language = parse_language(payload.get("language").or_else(|| payload.get("languages")));

        Some(NormalizedWork {
            book: CanonicalBook {
                id: id.to_string(),
                key: format!("/works/{}", id),
                title,
                author,
                cover_image,
                description,
                subjects: parse_subjects(payload.get("subjects")),
                first_publish_date,
                language,
                ebook_access: non_empty_str(payload.get("ebook_access")),
                source_endpoint: family.as_str().to_string(),
            },
            author_ref,
        })
    }

    /// Normalize a search or trending document.
    ///
    /// Records without a key cannot be linked to a detail page and are rejected.
    pub fn normalize_record(
        &self,
        record: &RawResultRecord,
        source: RecordSource,
    ) -> Option<CanonicalBook> {
        let Some(key) = record.key.as_deref() else {
            tracing::debug!(source = source.as_str(), "Dropping result record without key");
            return None;
        };

        Some(CanonicalBook {
            id: extract_book_id(key),
            key: key.to_string(),
            title: record
                .title
                .clone()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            author: record
                .first_author()
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_string(),
            cover_image: record
                .cover()
                .map(|id| self.cover_url(id, CoverSize::Medium)),
            description: NO_DESCRIPTION.to_string(),
            subjects: Vec::new(),
            first_publish_date: record
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            language: record
                .language
                .as_ref()
                .and_then(|langs| langs.first().cloned())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            ebook_access: record.ebook_access.clone(),
            source_endpoint: source.as_str().to_string(),
        })
    }

    pub fn normalize_records(
        &self,
        records: &[RawResultRecord],
        source: RecordSource,
    ) -> Vec<CanonicalBook> {
        records
            .iter()
            .filter_map(|r| self.normalize_record(r, source))
            .collect()
    }
}

fn log_miss(family: EndpointFamily, id: &str, field: &str) {
    tracing::debug!(%family, id, field, "Field missing from catalog payload, using fallback");
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Plain string, or `{ "value": "..." }`; anything else is the fallback
pub fn parse_description(value: Option<&Value>) -> String {
    let text = match value {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(map)) => map.get("value").and_then(Value::as_str),
        _ => None,
    };

    text.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Up to five subjects; accepts strings or `{ "name": ... }` objects
pub fn parse_subjects(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SUBJECTS)
        .map(str::to_string)
        .collect()
}

/// `"eng"`, `["eng", ...]` or `[{ "key": "/languages/eng" }, ...]`
pub fn parse_language(value: Option<&Value>) -> String {
    let first = match value {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };

    let language = match first {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(map)) => map
            .get("key")
            .and_then(Value::as_str)
            .map(extract_book_id),
        _ => None,
    };

    language
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> Normalizer {
        Normalizer::new("https://covers.openlibrary.org/")
    }

    #[test]
    fn test_description_shapes() {
        assert_eq!(parse_description(Some(&json!("S"))), "S");
        assert_eq!(parse_description(Some(&json!({ "type": "/type/text", "value": "S" }))), "S");
        assert_eq!(parse_description(Some(&json!(42))), NO_DESCRIPTION);
        assert_eq!(parse_description(Some(&json!(null))), NO_DESCRIPTION);
        assert_eq!(parse_description(Some(&json!(["S"]))), NO_DESCRIPTION);
        assert_eq!(parse_description(Some(&json!({ "value": 3 }))), NO_DESCRIPTION);
        assert_eq!(parse_description(Some(&json!(""))), NO_DESCRIPTION);
        assert_eq!(parse_description(None), NO_DESCRIPTION);
    }

    #[test]
    fn test_every_family_yields_title_and_author() {
        let payloads = [
            json!({ "title": "Dune", "authors": [{ "author": { "key": "/authors/OL1A" } }] }),
            json!({ "covers": [1] }),
            json!({ "title": 5, "authors": [{ "name": null }] }),
            json!({ "authors": "nonsense", "cover": "nonsense" }),
        ];

        for family in EndpointFamily::ALL {
            for payload in &payloads {
                let work = normalizer()
                    .normalize_work(payload, family, "OL1234W")
                    .expect("non-empty object normalizes");
                assert!(!work.book.title.is_empty(), "{family}: empty title");
                assert!(!work.book.author.is_empty(), "{family}: empty author");
                assert_eq!(work.book.key, "/works/OL1234W");
                assert_eq!(work.book.source_endpoint, family.as_str());
            }
        }
    }

    #[test]
    fn test_non_object_payload_is_not_found() {
        let n = normalizer();
        assert!(n.normalize_work(&json!({}), EndpointFamily::Works, "x").is_none());
        assert!(n.normalize_work(&json!("x"), EndpointFamily::Works, "x").is_none());
        assert!(n.normalize_work(&json!(null), EndpointFamily::Books, "x").is_none());
    }

    #[test]
    fn test_works_payload_flags_author_reference() {
        let payload = json!({
            "title": "Dune",
            "authors": [{ "author": { "key": "/authors/OL1A" }, "type": { "key": "/type/author_role" } }],
            "covers": [258027],
            "description": { "type": "/type/text", "value": "Spice." },
            "subjects": ["Science fiction", "Deserts", "Ecology", "Religion", "Politics", "Spice"],
            "first_publish_date": "1965"
        });

        let work = normalizer()
            .normalize_work(&payload, EndpointFamily::Works, "OL1234W")
            .unwrap();

        assert_eq!(work.author_ref.as_deref(), Some("/authors/OL1A"));
        assert_eq!(work.book.author, UNKNOWN_AUTHOR);
        assert_eq!(
            work.book.cover_image.as_deref(),
            Some("https://covers.openlibrary.org/b/id/258027-L.jpg")
        );
        assert_eq!(work.book.description, "Spice.");
        assert_eq!(work.book.subjects.len(), MAX_SUBJECTS);
        assert_eq!(work.book.first_publish_date, "1965");
        assert_eq!(work.book.language, UNKNOWN);
    }

    #[test]
    fn test_api_books_payload_uses_inline_fields() {
        let payload = json!({
            "title": "Dune",
            "authors": [{ "url": "https://openlibrary.org/authors/OL1A", "name": "Frank Herbert" }],
            "cover": { "small": "s.jpg", "medium": "m.jpg", "large": "l.jpg" },
            "subjects": [{ "name": "Science fiction", "url": "x" }],
            "publish_date": "1990",
            "notes": "Reissue."
        });

        let work = normalizer()
            .normalize_work(&payload, EndpointFamily::ApiBooks, "OL1234W")
            .unwrap();

        assert_eq!(work.author_ref, None);
        assert_eq!(work.book.author, "Frank Herbert");
        assert_eq!(work.book.cover_image.as_deref(), Some("l.jpg"));
        assert_eq!(work.book.subjects, vec!["Science fiction".to_string()]);
        assert_eq!(work.book.first_publish_date, "1990");
        assert_eq!(work.book.description, "Reissue.");
    }

    #[test]
    fn test_language_shapes() {
        assert_eq!(parse_language(Some(&json!("fre"))), "fre");
        assert_eq!(parse_language(Some(&json!(["eng", "fre"]))), "eng");
        assert_eq!(parse_language(Some(&json!([{ "key": "/languages/eng" }]))), "eng");
        assert_eq!(parse_language(Some(&json!([]))), UNKNOWN);
        assert_eq!(parse_language(None), UNKNOWN);
    }

    #[test]
    fn test_search_doc_normalization() {
        let record: RawResultRecord = serde_json::from_value(json!({
            "key": "/works/OL1234W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "cover_i": 258027,
            "first_publish_year": 1965
        }))
        .unwrap();

        let book = normalizer()
            .normalize_record(&record, RecordSource::Search)
            .unwrap();

        assert_eq!(book.id, "OL1234W");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(
            book.cover_image.as_deref(),
            Some("https://covers.openlibrary.org/b/id/258027-M.jpg")
        );
        assert_eq!(book.first_publish_date, "1965");
        assert_eq!(book.source_endpoint, "search");
    }

    #[test]
    fn test_records_without_key_are_dropped() {
        let records = vec![
            RawResultRecord {
                title: Some("No key".to_string()),
                ..Default::default()
            },
            RawResultRecord {
                key: Some("/works/OL2W".to_string()),
                ..Default::default()
            },
        ];

        let books = normalizer().normalize_records(&records, RecordSource::Trending);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, UNKNOWN_TITLE);
        assert_eq!(books[0].author, UNKNOWN_AUTHOR);
    }
}
