use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::modules::integrations::openlibrary::{CatalogSettings, DEFAULT_BASE_URL};
use crate::modules::normalizer::{DEFAULT_COVERS_BASE_URL, EndpointFamily};

pub const DEFAULT_FAVORITES_FILE: &str = "bookFavorites.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub openlibrary_base_url: String,
    pub covers_base_url: String,
    pub favorites_path: PathBuf,
    pub work_endpoints: Vec<EndpointFamily>,
    pub request_timeout: Duration,
    pub author_timeout: Duration,
    pub trending_limit: usize,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let favorites_path = env::var("FAVORITES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                if profile == "default" {
                    PathBuf::from(DEFAULT_FAVORITES_FILE)
                } else {
                    PathBuf::from(format!("bookFavorites_{}.json", profile))
                }
            });

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            openlibrary_base_url: env::var("OPENLIBRARY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            covers_base_url: env::var("COVERS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_COVERS_BASE_URL.to_string()),
            favorites_path,
            work_endpoints: env::var("WORK_ENDPOINTS")
                .map(|s| parse_work_endpoints(&s))
                .unwrap_or_else(|_| vec![EndpointFamily::Works]),
            request_timeout: secs_from_env("SEARCH_TIMEOUT_SECS", 8),
            author_timeout: secs_from_env("AUTHOR_TIMEOUT_SECS", 5),
            trending_limit: env::var("TRENDING_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(12),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            profile,
        }
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.openlibrary_base_url.clone(),
            work_endpoints: self.work_endpoints.clone(),
            request_timeout: self.request_timeout,
            author_timeout: self.author_timeout,
        }
    }
}

fn secs_from_env(name: &str, default: u64) -> Duration {
    let secs = env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

/// Parse `works,books,api_books` into an ordered, de-duplicated list.
/// Unknown names are skipped; an empty result falls back to `works`.
pub fn parse_work_endpoints(raw: &str) -> Vec<EndpointFamily> {
    let mut families = Vec::new();
    for name in raw.split(',').filter(|s| !s.trim().is_empty()) {
        match name.parse::<EndpointFamily>() {
            Ok(family) if !families.contains(&family) => families.push(family),
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring WORK_ENDPOINTS entry: {}", e),
        }
    }

    if families.is_empty() {
        families.push(EndpointFamily::Works);
    }
    families
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "PROFILE",
        "FAVORITES_PATH",
        "PORT",
        "WORK_ENDPOINTS",
        "SEARCH_TIMEOUT_SECS",
        "AUTHOR_TIMEOUT_SECS",
        "TRENDING_LIMIT",
        "CORS_ALLOWED_ORIGINS",
        "OPENLIBRARY_BASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment are serialized
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    fn test_parse_work_endpoints_order_and_dedup() {
        assert_eq!(
            parse_work_endpoints("books, works,books,bogus,api_books"),
            vec![
                EndpointFamily::Books,
                EndpointFamily::Works,
                EndpointFamily::ApiBooks
            ]
        );
        assert_eq!(parse_work_endpoints(""), vec![EndpointFamily::Works]);
        assert_eq!(parse_work_endpoints("bogus"), vec![EndpointFamily::Works]);
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.port, 8000);
        assert_eq!(config.openlibrary_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.favorites_path, PathBuf::from(DEFAULT_FAVORITES_FILE));
        assert_eq!(config.work_endpoints, vec![EndpointFamily::Works]);
        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(config.author_timeout, Duration::from_secs(5));
        assert_eq!(config.trending_limit, 12);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    #[serial]
    fn test_profile_and_overrides() {
        clear_env();
        // SAFETY: tests touching the environment are serialized
        unsafe {
            env::set_var("PROFILE", "alice");
            env::set_var("WORK_ENDPOINTS", "works,volumes_brief");
            env::set_var("SEARCH_TIMEOUT_SECS", "0");
            env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, ,http://b.test");
        }

        let config = Config::from_env();
        assert_eq!(
            config.favorites_path,
            PathBuf::from("bookFavorites_alice.json")
        );
        assert_eq!(
            config.work_endpoints,
            vec![EndpointFamily::Works, EndpointFamily::VolumesBrief]
        );
        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );

        clear_env();
    }
}
