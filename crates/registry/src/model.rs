//! Registry records
//!
//! Registry documents are produced by third parties, so parsing is lenient:
//! required fields (`id` and `path` of an entry) are enforced, while missing or
//! malformed optional fields fall back to their defaults instead of failing
//! the whole document. Malformed items inside lists are dropped.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::{Error, Result};

/// Version assumed when a document does not declare one
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// The registry index: every installable hook plus named presets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Registry display name
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Registry snapshot version, recorded in installed file headers
    #[serde(default, deserialize_with = "lenient")]
    pub version: String,

    /// Hook entries, unique by id
    #[serde(default, deserialize_with = "lenient_list")]
    pub hooks: Vec<HookEntry>,

    /// Preset name → hook ids, in install order
    #[serde(default, deserialize_with = "lenient")]
    pub presets: IndexMap<String, Vec<String>>,
}

/// One installable hook in the registry index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Stable identifier, e.g. `use-debounce`
    pub id: String,
    /// Storage path of the hook inside the registry, e.g. `hooks/use-debounce`
    pub path: String,
    /// Short description shown in listings
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// Per-hook metadata (`<path>/meta.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookMetadata {
    /// Display name
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Semantic version, `MAJOR.MINOR.PATCH`
    #[serde(default, deserialize_with = "lenient")]
    pub version: String,

    /// Free-text description
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,

    /// Search tags
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,

    /// Files to install, in order
    #[serde(default, deserialize_with = "lenient_list")]
    pub files: Vec<FileDescriptor>,

    /// Peer dependency → version range (informational only)
    #[serde(default, rename = "peerDependencies", deserialize_with = "lenient")]
    pub peer_dependencies: IndexMap<String, String>,
}

/// A single file of a hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path of the source text, relative to the hook's storage path
    pub src: String,
    /// Canonical destination, relative to the project (e.g. `hooks/use-x.ts`)
    pub dest: String,
}

impl Registry {
    /// Parse a registry index document
    ///
    /// Duplicate ids keep their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the document is not a JSON object
    pub fn from_value(value: JsonValue, url: &str) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Schema {
                url: url.to_string(),
                message: "registry index must be a JSON object".to_string(),
            });
        }

        let mut registry: Self = serde_json::from_value(value).map_err(|e| Error::Schema {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if registry.version.is_empty() {
            registry.version = UNKNOWN_VERSION.to_string();
        }

        let mut seen = std::collections::HashSet::new();
        registry.hooks.retain(|entry| {
            let first = seen.insert(entry.id.clone());
            if !first {
                tracing::warn!(id = %entry.id, "Duplicate hook id in registry, keeping the first entry");
            }
            first
        });

        Ok(registry)
    }

    /// Look up an entry by id
    pub fn find(&self, id: &str) -> Option<&HookEntry> {
        self.hooks.iter().find(|entry| entry.id == id)
    }

    /// Whether the registry knows this id
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Hook ids of a preset
    pub fn preset(&self, name: &str) -> Option<&[String]> {
        self.presets.get(name).map(Vec::as_slice)
    }
}

impl HookMetadata {
    /// Parse a metadata document for `entry`
    ///
    /// A missing display name falls back to the entry id and a missing
    /// version to `0.0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the document is not a JSON object
    pub fn from_value(value: JsonValue, entry: &HookEntry, url: &str) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Schema {
                url: url.to_string(),
                message: format!("metadata for '{}' must be a JSON object", entry.id),
            });
        }

        let mut meta: Self = serde_json::from_value(value).map_err(|e| Error::Schema {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if meta.name.is_empty() {
            meta.name.clone_from(&entry.id);
        }
        if meta.version.is_empty() {
            meta.version = UNKNOWN_VERSION.to_string();
        }

        Ok(meta)
    }
}

/// Deserialize a value, falling back to the default when it has the wrong shape
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a list, dropping items that have the wrong shape
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
