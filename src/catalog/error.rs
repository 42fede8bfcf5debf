//! Catalog error types

use thiserror::Error;

/// Catalog error with classification
///
/// Never crosses the module boundary: the `Catalog` trait absorbs failures
/// into empty results after logging.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl CatalogError {
    fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Network, message)
    }

    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::new(CatalogErrorKind::Status, format!("HTTP {status}"))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Decode, message)
    }
}

/// Failure classification for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Request exceeded the fixed timeout
    Timeout,
    /// Connection or transport failure
    Network,
    /// Upstream answered with a non-success status
    Status,
    /// Payload did not match the expected shape
    Decode,
}
