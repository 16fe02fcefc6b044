//! Hook registry access
//!
//! This crate provides a unified interface for reading a hook registry,
//! wherever it is hosted:
//!
//! - [`model`]: typed records for the registry index and per-hook metadata
//! - [`RegistryClient`]: the transport seam (`fetch_json` / `fetch_text`)
//! - [`http::HttpClient`]: registries served over HTTP(S)
//! - [`fs::FsClient`]: registries mirrored into a local directory
//! - [`remote::Remote`]: resolves registry-relative locations and parses responses

use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod fs;
pub mod http;
pub mod model;
pub mod remote;

pub use model::{FileDescriptor, HookEntry, HookMetadata, Registry};
pub use remote::Remote;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// A registry resource could not be retrieved
///
/// Carries the status code reported by the transport. JSON lookups attach a
/// human hint for the common 404/401/403 cases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Request to {url} failed with status {status}{}", .hint.as_ref().map(|h| format!("\n  hint: {h}")).unwrap_or_default())]
pub struct FetchError {
    /// Status code (HTTP status, or the closest equivalent for local registries)
    pub status: u16,
    /// Location that was requested
    pub url: String,
    /// Optional advice for the user
    pub hint: Option<String>,
}

impl FetchError {
    /// Create an error without a hint
    pub fn new(status: u16, url: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            hint: None,
        }
    }

    /// Attach the standard hint for this status, if there is one
    #[must_use]
    pub fn with_hint(mut self) -> Self {
        self.hint = match self.status {
            404 => Some(
                "the resource does not exist; check the registry location and the hook id"
                    .to_string(),
            ),
            401 | 403 => Some(
                "the registry refused the request; check that it is public or that you have access"
                    .to_string(),
            ),
            _ => None,
        };
        self
    }
}

/// Error types for registry access
#[derive(Error, Debug)]
pub enum Error {
    /// The registry answered with a non-success status
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The request never produced a response
    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON
    #[error("Invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON did not have the expected shape
    #[error("Invalid registry data from {url}: {message}")]
    Schema { url: String, message: String },

    /// Local registry read failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status code of a failed fetch, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Transport used to read registry resources
///
/// Implementations only move bytes; locating resources and parsing them is
/// the job of [`Remote`]. Both methods fail with [`Error::Fetch`] when the
/// resource is unavailable.
pub trait RegistryClient: Send + Sync {
    /// Short name of the transport, for diagnostics
    fn name(&self) -> &str;

    /// Fetch and parse a JSON document
    ///
    /// Non-success statuses carry a hint (see [`FetchError::with_hint`]).
    fn fetch_json(&self, url: &str) -> Result<JsonValue>;

    /// Fetch a raw text document
    fn fetch_text(&self, url: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_fetch_error_hint_for_not_found() {
        let err = FetchError::new(404, "https://example.com/registry.json").with_hint();
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/registry.json"));
        assert!(msg.contains("hint: the resource does not exist"));
    }

    #[test]
    fn test_fetch_error_hint_for_forbidden() {
        for status in [401, 403] {
            let err = FetchError::new(status, "u").with_hint();
            assert!(err.hint.unwrap().contains("refused"));
        }
    }

    #[test]
    fn test_fetch_error_without_hint() {
        let err = FetchError::new(500, "u").with_hint();
        assert!(err.hint.is_none());
        assert!(!err.to_string().contains("hint"));
    }

    #[test]
    fn test_error_status() {
        let err: Error = FetchError::new(404, "u").into();
        assert_eq!(err.status(), Some(404));

        let err = Error::Schema {
            url: "u".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
