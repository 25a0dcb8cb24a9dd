//! Catalog detail endpoint families.
//!
//! Each family answers with its own JSON shape, so the same logical field lives
//! at a different path depending on who answered. The table below binds every
//! family to its URL, its payload unwrap and its field extractors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Where the author of a detail payload can be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorField {
    /// Display name present in the payload
    Inline(String),
    /// Only a reference such as `/authors/OL1A`; needs a secondary lookup
    Reference(String),
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointFamily {
    /// `/works/{id}.json`
    Works,
    /// `/books/{id}.json` (editions)
    Books,
    /// `/api/books?bibkeys=ID:{id}&format=json&jscmd=data`
    ApiBooks,
    /// `/api/volumes/brief/isbn/{id}.json`
    VolumesBrief,
}

/// Field extractors for one family
pub(crate) struct Extractors {
    pub author: fn(&Value) -> AuthorField,
    /// Returns a cover id or a ready URL
    pub cover: fn(&Value) -> Option<CoverSource>,
    pub description: fn(&Value) -> Option<&Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoverSource {
    Id(i64),
    Url(String),
}

const WORKS: Extractors = Extractors {
    author: works_author,
    cover: covers_array,
    description: plain_description,
};

const BOOKS: Extractors = Extractors {
    author: edition_author,
    cover: covers_array,
    description: description_or_notes,
};

const API_BOOKS: Extractors = Extractors {
    author: named_author,
    cover: cover_large_or_medium,
    description: description_or_notes,
};

const VOLUMES_BRIEF: Extractors = Extractors {
    author: named_author,
    cover: cover_medium,
    description: description_or_notes,
};

impl EndpointFamily {
    pub const ALL: [EndpointFamily; 4] = [
        EndpointFamily::Works,
        EndpointFamily::Books,
        EndpointFamily::ApiBooks,
        EndpointFamily::VolumesBrief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointFamily::Works => "works",
            EndpointFamily::Books => "books",
            EndpointFamily::ApiBooks => "api_books",
            EndpointFamily::VolumesBrief => "volumes_brief",
        }
    }

    /// Build the request URL for `id` against a catalog base URL
    pub fn url(&self, base_url: &str, id: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let id = urlencoding::encode(id);
        match self {
            EndpointFamily::Works => format!("{}/works/{}.json", base, id),
            EndpointFamily::Books => format!("{}/books/{}.json", base, id),
            EndpointFamily::ApiBooks => format!(
                "{}/api/books?bibkeys=ID:{}&format=json&jscmd=data",
                base, id
            ),
            EndpointFamily::VolumesBrief => {
                format!("{}/api/volumes/brief/isbn/{}.json", base, id)
            }
        }
    }

    /// Extract the record object from a response body.
    ///
    /// Returns `None` unless the result is a non-empty JSON object.
    pub fn unwrap_payload(&self, body: Value, id: &str) -> Option<Value> {
        let payload = match self {
            EndpointFamily::Works | EndpointFamily::Books => Some(body),
            EndpointFamily::ApiBooks => match body {
                Value::Object(mut map) => map.remove(&format!("ID:{}", id)),
                _ => None,
            },
            // First record in document order (serde_json preserve_order)
            EndpointFamily::VolumesBrief => body
                .get("records")
                .and_then(Value::as_object)
                .and_then(|records| records.values().next())
                .and_then(|record| record.get("data"))
                .cloned(),
        };

        payload.filter(|p| p.as_object().is_some_and(|map| !map.is_empty()))
    }

    pub(crate) fn extractors(&self) -> &'static Extractors {
        match self {
            EndpointFamily::Works => &WORKS,
            EndpointFamily::Books => &BOOKS,
            EndpointFamily::ApiBooks => &API_BOOKS,
            EndpointFamily::VolumesBrief => &VOLUMES_BRIEF,
        }
    }
}

impl fmt::Display for EndpointFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "works" => Ok(EndpointFamily::Works),
            "books" | "editions" => Ok(EndpointFamily::Books),
            "api_books" => Ok(EndpointFamily::ApiBooks),
            "volumes_brief" | "volumes" => Ok(EndpointFamily::VolumesBrief),
            other => Err(format!("Unknown endpoint family: {}", other)),
        }
    }
}

fn first_author(work: &Value) -> Option<&Value> {
    work.get("authors").and_then(Value::as_array)?.first()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// works: authors[0].author.key is the usual shape; authors[0].name is rare
fn works_author(work: &Value) -> AuthorField {
    let Some(first) = first_author(work) else {
        return AuthorField::Missing;
    };
    if let Some(key) = non_empty_str(first.get("author").and_then(|a| a.get("key"))) {
        return AuthorField::Reference(key);
    }
    match non_empty_str(first.get("name")) {
        Some(name) => AuthorField::Inline(name),
        None => AuthorField::Missing,
    }
}

// editions: authors[0].name, else authors[0].key
fn edition_author(work: &Value) -> AuthorField {
    let Some(first) = first_author(work) else {
        return AuthorField::Missing;
    };
    if let Some(name) = non_empty_str(first.get("name")) {
        return AuthorField::Inline(name);
    }
    match non_empty_str(first.get("key")) {
        Some(key) => AuthorField::Reference(key),
        None => AuthorField::Missing,
    }
}

fn named_author(work: &Value) -> AuthorField {
    match non_empty_str(first_author(work).and_then(|a| a.get("name"))) {
        Some(name) => AuthorField::Inline(name),
        None => AuthorField::Missing,
    }
}

fn covers_array(work: &Value) -> Option<CoverSource> {
    work.get("covers")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(Value::as_i64)
        .find(|id| *id > 0)
        .map(CoverSource::Id)
}

fn cover_large_or_medium(work: &Value) -> Option<CoverSource> {
    let cover = work.get("cover")?;
    non_empty_str(cover.get("large"))
        .or_else(|| non_empty_str(cover.get("medium")))
        .map(CoverSource::Url)
}

fn cover_medium(work: &Value) -> Option<CoverSource> {
    non_empty_str(work.get("cover").and_then(|c| c.get("medium"))).map(CoverSource::Url)
}

fn plain_description(work: &Value) -> Option<&Value> {
    work.get("description")
}

fn description_or_notes(work: &Value) -> Option<&Value> {
    work.get("description").or_else(|| work.get("notes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_family_urls() {
        let base = "https://openlibrary.org/";
        assert_eq!(
            EndpointFamily::Works.url(base, "OL1234W"),
            "https://openlibrary.org/works/OL1234W.json"
        );
        assert_eq!(
            EndpointFamily::ApiBooks.url(base, "OL1234W"),
            "https://openlibrary.org/api/books?bibkeys=ID:OL1234W&format=json&jscmd=data"
        );
        assert_eq!(
            EndpointFamily::VolumesBrief.url(base, "9780441013593"),
            "https://openlibrary.org/api/volumes/brief/isbn/9780441013593.json"
        );
    }

    #[test]
    fn test_parse_family_names() {
        assert_eq!("works".parse::<EndpointFamily>(), Ok(EndpointFamily::Works));
        assert_eq!(
            "API-Books".parse::<EndpointFamily>(),
            Ok(EndpointFamily::ApiBooks)
        );
        assert_eq!(
            " volumes_brief ".parse::<EndpointFamily>(),
            Ok(EndpointFamily::VolumesBrief)
        );
        assert!("isbn".parse::<EndpointFamily>().is_err());
    }

    #[test]
    fn test_unwrap_api_books_payload() {
        let body = json!({ "ID:OL1W": { "title": "Dune" } });
        let payload = EndpointFamily::ApiBooks.unwrap_payload(body, "OL1W").unwrap();
        assert_eq!(payload["title"], "Dune");

        let missing = EndpointFamily::ApiBooks.unwrap_payload(json!({}), "OL1W");
        assert!(missing.is_none());
    }

    #[test]
    fn test_unwrap_volumes_payload() {
        let body = json!({
            "records": { "/books/OL7M": { "data": { "title": "Dune" } } }
        });
        let payload = EndpointFamily::VolumesBrief
            .unwrap_payload(body, "9780441013593")
            .unwrap();
        assert_eq!(payload["title"], "Dune");

        let empty = json!({ "records": {} });
        assert!(EndpointFamily::VolumesBrief.unwrap_payload(empty, "x").is_none());
    }

    #[test]
    fn test_unwrap_volumes_takes_first_record_in_document_order() {
        // OL9M sorts after OL10M but comes first in the body
        let body: Value = serde_json::from_str(
            r#"{"records": {
                "/books/OL9M": { "data": { "title": "First" } },
                "/books/OL10M": { "data": { "title": "Second" } }
            }}"#,
        )
        .unwrap();
        let payload = EndpointFamily::VolumesBrief
            .unwrap_payload(body, "9780441013593")
            .unwrap();
        assert_eq!(payload["title"], "First");
    }

    #[test]
    fn test_unwrap_rejects_empty_or_non_object() {
        assert!(EndpointFamily::Works.unwrap_payload(json!({}), "x").is_none());
        assert!(EndpointFamily::Works.unwrap_payload(json!([1, 2]), "x").is_none());
        assert!(EndpointFamily::Works.unwrap_payload(json!(null), "x").is_none());
    }

    #[test]
    fn test_works_author_prefers_reference() {
        let work = json!({ "authors": [{ "author": { "key": "/authors/OL1A" } }] });
        assert_eq!(
            works_author(&work),
            AuthorField::Reference("/authors/OL1A".to_string())
        );

        let inline = json!({ "authors": [{ "name": "Frank Herbert" }] });
        assert_eq!(
            works_author(&inline),
            AuthorField::Inline("Frank Herbert".to_string())
        );

        assert_eq!(works_author(&json!({ "authors": [] })), AuthorField::Missing);
        assert_eq!(works_author(&json!({ "authors": "x" })), AuthorField::Missing);
    }

    #[test]
    fn test_edition_author_falls_back_to_key() {
        let edition = json!({ "authors": [{ "key": "/authors/OL2A" }] });
        assert_eq!(
            edition_author(&edition),
            AuthorField::Reference("/authors/OL2A".to_string())
        );
    }

    #[test]
    fn test_cover_paths_per_family() {
        let api = json!({ "cover": { "medium": "m.jpg", "large": "l.jpg" } });
        assert_eq!(
            cover_large_or_medium(&api),
            Some(CoverSource::Url("l.jpg".to_string()))
        );
        assert_eq!(cover_medium(&api), Some(CoverSource::Url("m.jpg".to_string())));

        let work = json!({ "covers": [-1, 258027] });
        assert_eq!(covers_array(&work), Some(CoverSource::Id(258027)));
        assert_eq!(covers_array(&json!({})), None);
    }
}
