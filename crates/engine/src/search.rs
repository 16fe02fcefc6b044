//! Registry search

use hookshelf_registry::{HookEntry, HookMetadata, Registry, Remote};
use serde::Serialize;

use crate::pool::{DEFAULT_WORKERS, bounded_map};

/// A registry entry that matched a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Hook id
    pub id: String,
    /// Registry description, falling back to the metadata description
    pub description: Option<String>,
    /// Published version, when metadata was available
    pub version: Option<String>,
    /// Metadata tags
    pub tags: Vec<String>,
}

/// Case-insensitive search over ids, descriptions, display names and tags
///
/// Metadata for every entry is fetched through the bounded worker pool. An
/// entry whose metadata cannot be fetched is still matched on its registry
/// fields. An empty query matches everything.
pub fn search(remote: &Remote, registry: &Registry, query: &str) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();

    let metadata = bounded_map(&registry.hooks, DEFAULT_WORKERS, |entry| {
        remote
            .metadata(entry)
            .inspect_err(|e| tracing::debug!(id = %entry.id, "Metadata unavailable for search: {e}"))
            .ok()
    });

    registry
        .hooks
        .iter()
        .zip(metadata)
        .filter(|(entry, meta)| matches(&query, entry, meta.as_ref()))
        .map(|(entry, meta)| hit(entry, meta))
        .collect()
}

fn matches(query: &str, entry: &HookEntry, meta: Option<&HookMetadata>) -> bool {
    if query.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(entry.id.as_str())
        || entry.description.as_deref().is_some_and(contains)
        || meta.is_some_and(|meta| {
            contains(meta.name.as_str())
                || contains(meta.description.as_str())
                || meta.tags.iter().any(|tag| contains(tag.as_str()))
        })
}

fn hit(entry: &HookEntry, meta: Option<HookMetadata>) -> SearchHit {
    let (version, tags, meta_description) = match meta {
        Some(meta) => (Some(meta.version), meta.tags, Some(meta.description)),
        None => (None, Vec::new(), None),
    };

    SearchHit {
        id: entry.id.clone(),
        description: entry
            .description
            .clone()
            .or(meta_description.filter(|d| !d.is_empty())),
        version,
        tags,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn entry(id: &str, description: Option<&str>) -> HookEntry {
        HookEntry {
            id: id.to_string(),
            path: format!("hooks/{id}"),
            description: description.map(str::to_string),
        }
    }

    fn meta(name: &str, tags: &[&str]) -> HookMetadata {
        HookMetadata {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            description: "Tracks something".to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_registry_fields() {
        let e = entry("use-debounce", Some("Debounce a value"));
        assert!(matches("debounce", &e, None));
        assert!(matches("value", &e, None));
        assert!(!matches("throttle", &e, None));
    }

    #[test]
    fn test_matches_metadata_fields() {
        let e = entry("use-x", None);
        let m = meta("useWindowSize", &["dom", "resize"]);
        assert!(matches("windowsize", &e, Some(&m)));
        assert!(matches("resize", &e, Some(&m)));
        assert!(matches("tracks", &e, Some(&m)));
        assert!(!matches("network", &e, Some(&m)));
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert!(matches("", &entry("use-x", None), None));
    }

    #[test]
    fn test_hit_falls_back_to_metadata_description() {
        let found = hit(&entry("use-x", None), Some(meta("useX", &["a"])));
        assert_eq!(found.description.as_deref(), Some("Tracks something"));
        assert_eq!(found.version.as_deref(), Some("1.0.0"));
        assert_eq!(found.tags, vec!["a"]);

        let found = hit(&entry("use-y", Some("Own text")), None);
        assert_eq!(found.description.as_deref(), Some("Own text"));
        assert!(found.version.is_none());
    }
}
