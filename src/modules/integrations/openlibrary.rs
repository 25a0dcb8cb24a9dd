//! Open Library catalog client.
//!
//! Search, work detail (with ordered endpoint fallback), author lookup and the
//! daily trending list. Every request carries a fixed timeout; nothing is
//! retried on the same endpoint.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

use crate::domain::{CatalogError, CatalogSource, FetchedWork};
use crate::models::book::UNKNOWN_AUTHOR;
use crate::models::{RawResultRecord, ResultPage, TrendingPage};
use crate::modules::normalizer::EndpointFamily;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
const USER_AGENT: &str = concat!("booksearch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    /// Candidate detail endpoints, tried in order
    pub work_endpoints: Vec<EndpointFamily>,
    /// Search, trending and work requests
    pub request_timeout: Duration,
    /// Secondary author lookups
    pub author_timeout: Duration,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            work_endpoints: vec![EndpointFamily::Works],
            request_timeout: Duration::from_secs(8),
            author_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: reqwest::Client,
    settings: CatalogSettings,
}

impl OpenLibraryClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Network(format!("Failed to build client: {}", e)))?;

        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    async fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, CatalogError> {
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to send request: {}", e)))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Network(format!(
                "Open Library API returned status: {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| CatalogError::Malformed(format!("Failed to parse JSON: {}", e)))
    }

    fn author_url(&self, author_ref: &str) -> String {
        let reference = author_ref.trim().trim_end_matches(".json");
        if reference.starts_with('/') {
            format!("{}{}.json", self.base_url(), reference)
        } else {
            format!(
                "{}/authors/{}.json",
                self.base_url(),
                urlencoding::encode(reference)
            )
        }
    }
}

#[async_trait]
impl CatalogSource for OpenLibraryClient {
    async fn search(&self, query: &str) -> Result<ResultPage, CatalogError> {
        let url = format!(
            "{}/search.json?q={}",
            self.base_url(),
            urlencoding::encode(query)
        );

        tracing::info!("Searching Open Library for {:?}", query);
        let body = self
            .get_json(&url, self.settings.request_timeout)
            .await
            .inspect_err(|e| tracing::error!("Error searching books: {}", e))?;

        let page: ResultPage = serde_json::from_value(body)
            .map_err(|e| CatalogError::Malformed(format!("Unexpected search payload: {}", e)))?;

        tracing::debug!(
            "Search {:?} returned {} docs ({} found)",
            query,
            page.items.len(),
            page.total_found
        );
        Ok(page)
    }

    async fn fetch_work(&self, id: &str) -> Result<FetchedWork, CatalogError> {
        for family in &self.settings.work_endpoints {
            let url = family.url(self.base_url(), id);
            tracing::debug!("Attempting to fetch from: {}", url);

            match self.get_json(&url, self.settings.request_timeout).await {
                Ok(body) => match family.unwrap_payload(body, id) {
                    Some(payload) => {
                        tracing::info!("Fetched book data for {} from: {}", id, url);
                        return Ok(FetchedWork {
                            payload,
                            endpoint: *family,
                            url,
                        });
                    }
                    None => tracing::warn!("Empty payload from endpoint: {}", url),
                },
                Err(e) => tracing::warn!("Attempt failed for endpoint: {} - {}", url, e),
            }
        }

        tracing::warn!(
            "No candidate endpoint produced data for {} ({} tried)",
            id,
            self.settings.work_endpoints.len()
        );
        Err(CatalogError::NotFound)
    }

    async fn fetch_author(&self, author_ref: &str) -> String {
        let url = self.author_url(author_ref);

        match self.get_json(&url, self.settings.author_timeout).await {
            Ok(body) => body
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    tracing::debug!("Author record {} has no name", author_ref);
                    UNKNOWN_AUTHOR.to_string()
                }),
            Err(e) => {
                tracing::warn!("Error fetching author details for {}: {}", author_ref, e);
                UNKNOWN_AUTHOR.to_string()
            }
        }
    }

    async fn trending(&self, limit: usize) -> Result<Vec<RawResultRecord>, CatalogError> {
        let url = format!("{}/trending/daily.json?limit={}", self.base_url(), limit);

        let body = self
            .get_json(&url, self.settings.request_timeout)
            .await
            .inspect_err(|e| tracing::error!("Error fetching popular books: {}", e))?;

        let page: TrendingPage = serde_json::from_value(body)
            .map_err(|e| CatalogError::Malformed(format!("Unexpected trending payload: {}", e)))?;

        let total = page.works.len();
        let works: Vec<RawResultRecord> = page
            .works
            .into_iter()
            .filter(|w| w.key.is_some() && w.title.is_some())
            .collect();

        if works.len() != total {
            tracing::debug!(
                "Filtered {} trending entries without key or title",
                total - works.len()
            );
        }
        Ok(works)
    }
}
