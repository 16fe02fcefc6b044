//! Registries mirrored into a local directory
//!
//! Useful for offline work, private registries checked into a monorepo, and
//! tests. Locations are plain paths, optionally prefixed with `file://`.
//! Filesystem failures are mapped onto the status codes an HTTP registry
//! would report, so callers handle both transports the same way.

use serde_json::Value as JsonValue;
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, FetchError, RegistryClient, Result};

/// Local filesystem transport
#[derive(Debug, Default, Clone, Copy)]
pub struct FsClient;

impl FsClient {
    /// Create a filesystem client
    pub fn new() -> Self {
        Self
    }

    fn read(url: &str, hint: bool) -> Result<String> {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        tracing::debug!(path = %path.display(), "read");

        std::fs::read_to_string(path).map_err(|e| {
            let status = match e.kind() {
                ErrorKind::NotFound => 404,
                ErrorKind::PermissionDenied => 403,
                _ => return Error::Io(e),
            };
            let err = FetchError::new(status, url);
            Error::Fetch(if hint { err.with_hint() } else { err })
        })
    }
}

impl RegistryClient for FsClient {
    fn name(&self) -> &str {
        "fs"
    }

    fn fetch_json(&self, url: &str) -> Result<JsonValue> {
        let body = Self::read(url, true)?;
        serde_json::from_str(&body).map_err(|e| Error::InvalidJson {
            url: url.to_string(),
            source: e,
        })
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        Self::read(url, false)
    }
}
