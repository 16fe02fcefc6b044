//! Read-only consistency checks of the local inventory against the registry
//!
//! - [`outdated`]: installed hooks whose registry version is newer
//! - [`doctor`]: files that are missing, unlabelled, mislabelled or orphaned
//!
//! Neither check mutates anything. Inconsistencies are reported, never raised.

use hookshelf_core::path::AbsPath;
use hookshelf_registry::{Registry, Remote, model::UNKNOWN_VERSION};
use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::header;
use crate::inventory::InstalledItem;
use crate::pool::{DEFAULT_WORKERS, bounded_map};
use crate::version::is_newer;

/// An installed hook with a newer registry version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedItem {
    /// Hook id
    pub id: String,
    /// Version recorded in the local header (`0.0.0` when unreadable)
    pub local: String,
    /// Version currently published in the registry
    pub remote: String,
    /// Installed file
    pub path: AbsPath,
}

/// Find installed hooks that have a newer version in the registry
///
/// Items unknown to the registry are skipped. Metadata is fetched through the
/// bounded worker pool; the result is sorted by id.
///
/// # Errors
///
/// Returns the first metadata fetch failure
pub fn outdated(remote: &Remote, registry: &Registry, items: &[InstalledItem]) -> Result<Vec<OutdatedItem>> {
    let known: Vec<_> = items
        .iter()
        .filter_map(|item| registry.find(&item.id).map(|entry| (item, entry)))
        .collect();

    let results = bounded_map(&known, DEFAULT_WORKERS, |(item, entry)| -> Result<_> {
        let meta = remote.metadata(entry)?;
        let local = local_version(&item.path);

        tracing::debug!(id = %item.id, %local, remote = %meta.version, "Compared versions");
        Ok(is_newer(&meta.version, &local).then(|| OutdatedItem {
            id: item.id.clone(),
            local,
            remote: meta.version,
            path: item.path.clone(),
        }))
    });

    let mut outdated = results
        .into_iter()
        .collect::<Result<Vec<Option<OutdatedItem>>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    outdated.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(outdated)
}

fn local_version(path: &AbsPath) -> String {
    std::fs::read_to_string(path.as_path())
        .ok()
        .and_then(|content| header::decode(&content))
        .map_or_else(|| UNKNOWN_VERSION.to_string(), |info| info.version)
}

/// Kind of inconsistency found by [`doctor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IssueKind {
    /// The inventory names a file that does not exist
    MissingFile,
    /// The file has no version header
    NoHeader,
    /// The header names a different hook than the file name
    IdMismatch {
        /// Id found in the header
        header_id: String,
    },
    /// The hook is not in the registry
    NotInRegistry,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile => write!(f, "missing file"),
            Self::NoHeader => write!(f, "no header, needs reinstall"),
            Self::IdMismatch { header_id } => write!(f, "id mismatch (header says {header_id})"),
            Self::NotInRegistry => write!(f, "not in registry"),
        }
    }
}

/// One inconsistency for one installed hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorIssue {
    /// Inventory id
    pub id: String,
    /// Installed file
    pub path: AbsPath,
    /// What is wrong
    #[serde(flatten)]
    pub kind: IssueKind,
}

/// Result of [`doctor`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorReport {
    /// Number of installed hooks checked
    pub items_checked: usize,
    /// At most one issue per hook, in inventory order
    pub issues: Vec<DoctorIssue>,
}

impl DoctorReport {
    /// Check if every installed hook passed
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    /// Get a summary of the results
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_healthy() {
            format!("All {} installed hooks look good", self.items_checked)
        } else {
            format!(
                "Found {} issues in {} installed hooks",
                self.issues.len(),
                self.items_checked
            )
        }
    }
}

/// Verify every installed hook
///
/// Per hook, the first failing check wins: missing file, then missing
/// header, then header/file name mismatch, then absence from the registry.
pub fn doctor(registry: &Registry, items: &[InstalledItem]) -> DoctorReport {
    let mut report = DoctorReport {
        items_checked: items.len(),
        ..Default::default()
    };

    for item in items {
        if let Some(kind) = check_item(registry, item) {
            tracing::debug!(id = %item.id, issue = %kind, "Doctor issue");
            report.issues.push(DoctorIssue {
                id: item.id.clone(),
                path: item.path.clone(),
                kind,
            });
        }
    }

    report
}

fn check_item(registry: &Registry, item: &InstalledItem) -> Option<IssueKind> {
    if !item.path.as_path().is_file() {
        return Some(IssueKind::MissingFile);
    }

    let content = std::fs::read_to_string(item.path.as_path()).unwrap_or_default();
    let Some(info) = header::decode(&content) else {
        return Some(IssueKind::NoHeader);
    };

    if info.id != item.id {
        return Some(IssueKind::IdMismatch { header_id: info.id });
    }

    if !registry.contains(&item.id) {
        return Some(IssueKind::NotInRegistry);
    }

    None
}
