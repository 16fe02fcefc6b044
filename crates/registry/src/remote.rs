//! Registry-relative resource resolution
//!
//! A registry location is either the index document itself (ending in
//! `.json`) or the directory that contains `registry.json`. Every other
//! resource lives under the hook's storage path:
//!
//! ```text
//! <base>/registry.json
//! <base>/<path>/meta.json
//! <base>/<path>/<src>
//! <base>/<path>/README.md
//! ```

use crate::fs::FsClient;
use crate::http::{HttpClient, is_http_location};
use crate::model::{HookEntry, HookMetadata, Registry};
use crate::{RegistryClient, Result};

/// Name of the index document
pub const INDEX_FILE: &str = "registry.json";
/// Name of the per-hook metadata document
pub const METADATA_FILE: &str = "meta.json";
/// Name of the per-hook readme
pub const README_FILE: &str = "README.md";

/// A registry reachable through a [`RegistryClient`]
pub struct Remote {
    client: Box<dyn RegistryClient>,
    base: String,
    index: String,
}

impl Remote {
    /// Create a remote for `location` using an explicit transport
    pub fn new(location: &str, client: Box<dyn RegistryClient>) -> Self {
        let location = location.trim();
        let (base, index) = if location.to_ascii_lowercase().ends_with(".json") {
            let base = location
                .rsplit_once('/')
                .map_or_else(String::new, |(parent, _)| parent.to_string());
            (base, location.to_string())
        } else {
            let base = location.trim_end_matches('/').to_string();
            let index = join_url(&base, INDEX_FILE);
            (base, index)
        };

        Self {
            client,
            base,
            index,
        }
    }

    /// Open a remote, picking the transport from the location
    ///
    /// `http://` and `https://` locations are fetched over the network;
    /// anything else is read from the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn open(location: &str) -> Result<Self> {
        let client: Box<dyn RegistryClient> = if is_http_location(location) {
            Box::new(HttpClient::new()?)
        } else {
            Box::new(FsClient::new())
        };
        tracing::debug!(location, transport = client.name(), "Opening registry");
        Ok(Self::new(location, client))
    }

    /// Location of the index document
    pub fn location(&self) -> &str {
        &self.index
    }

    /// Fetch and parse the registry index
    ///
    /// # Errors
    ///
    /// Returns an error if the index is unreachable or malformed
    pub fn registry(&self) -> Result<Registry> {
        let value = self.client.fetch_json(&self.index)?;
        Registry::from_value(value, &self.index)
    }

    /// Fetch and parse the metadata of a hook
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata is unreachable or malformed
    pub fn metadata(&self, entry: &HookEntry) -> Result<HookMetadata> {
        let url = self.resource(entry, METADATA_FILE);
        let value = self.client.fetch_json(&url)?;
        HookMetadata::from_value(value, entry, &url)
    }

    /// Fetch the source text of one file of a hook
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreachable
    pub fn file(&self, entry: &HookEntry, src: &str) -> Result<String> {
        self.client.fetch_text(&self.resource(entry, src))
    }

    /// Fetch the readme of a hook
    ///
    /// # Errors
    ///
    /// Returns an error if the readme is unreachable
    pub fn readme(&self, entry: &HookEntry) -> Result<String> {
        self.client.fetch_text(&self.resource(entry, README_FILE))
    }

    fn resource(&self, entry: &HookEntry, name: &str) -> String {
        join_url(&join_url(&self.base, &entry.path), name)
    }
}

/// Join two location segments with exactly one `/`
fn join_url(base: &str, segment: &str) -> String {
    let segment = segment.trim_start_matches("./").trim_start_matches('/');
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), segment)
    }
}
