//! Domain error types
//!
//! These errors are framework-agnostic and represent failures of the catalog
//! and of the local favorites slot. None of them is fatal to the process.

use thiserror::Error;

/// Failures talking to the external catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Timeout, DNS failure or non-2xx status
    #[error("Network error: {0}")]
    Network(String),
    /// No candidate endpoint produced a usable record
    #[error("Record not found")]
    NotFound,
    /// Body could not be decoded as JSON at all
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Failures reading or writing durable favorites storage
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
