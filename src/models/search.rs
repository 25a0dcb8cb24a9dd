use serde::{Deserialize, Serialize};

use super::lenient;

/// One search or trending document as the catalog returns it.
///
/// Every field is optional; malformed values decode as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string_list")]
    pub author_name: Option<Vec<String>>,
    /// Names from `authors[].name`, used by some trending entries
    #[serde(
        default,
        deserialize_with = "lenient::named_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub cover_i: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub cover_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub first_publish_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub edition_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string_list")]
    pub language: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ebook_access: Option<String>,
}

impl RawResultRecord {
    /// First listed author, whichever field carries it
    pub fn first_author(&self) -> Option<&str> {
        self.author_name
            .as_ref()
            .and_then(|names| names.iter().find(|n| !n.trim().is_empty()))
            .or_else(|| self.authors.iter().find(|n| !n.trim().is_empty()))
            .map(String::as_str)
    }

    /// `cover_i` on search docs, `cover_id` on some trending entries
    pub fn cover(&self) -> Option<i64> {
        self.cover_i.or(self.cover_id).filter(|id| *id > 0)
    }
}

/// A page of search results.
///
/// Decoded from the catalog's `{docs, numFound}` and presented as
/// `{items, totalFound}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(
        rename(serialize = "items", deserialize = "docs"),
        default,
        deserialize_with = "lenient::records"
    )]
    pub items: Vec<RawResultRecord>,
    #[serde(
        rename(serialize = "totalFound", deserialize = "numFound"),
        default,
        deserialize_with = "lenient::count"
    )]
    pub total_found: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendingPage {
    #[serde(default, deserialize_with = "lenient::records")]
    pub works: Vec<RawResultRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_page_decodes_catalog_shape() {
        let page: ResultPage = serde_json::from_value(json!({
            "numFound": 1,
            "docs": [{
                "key": "/works/OL1234W",
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "cover_i": 258027
            }]
        }))
        .unwrap();

        assert_eq!(page.total_found, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_author(), Some("Frank Herbert"));
        assert_eq!(page.items[0].cover(), Some(258027));
    }

    #[test]
    fn test_malformed_fields_decode_as_absent() {
        let page: ResultPage = serde_json::from_value(json!({
            "numFound": "not a number",
            "docs": [
                { "key": 42, "title": ["array"], "cover_i": "12", "author_name": "Solo" },
                "not an object",
                null
            ]
        }))
        .unwrap();

        assert_eq!(page.total_found, 0);
        assert_eq!(page.items.len(), 1);
        let record = &page.items[0];
        assert_eq!(record.key, None);
        assert_eq!(record.title, None);
        assert_eq!(record.cover_i, Some(12));
        assert_eq!(record.author_name, None);
    }

    #[test]
    fn test_result_page_serializes_as_items() {
        let page = ResultPage {
            items: vec![RawResultRecord::default()],
            total_found: 3,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalFound"], 3);
        assert!(value["items"].is_array());
    }

    #[test]
    fn test_trending_authors_fallback() {
        let page: TrendingPage = serde_json::from_value(json!({
            "works": [{ "key": "/works/OL9W", "title": "X", "authors": [{"name": "Ann"}], "cover_id": 7 }]
        }))
        .unwrap();
        assert_eq!(page.works[0].first_author(), Some("Ann"));
        assert_eq!(page.works[0].cover(), Some(7));
    }
}
