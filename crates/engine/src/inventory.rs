//! Local inventory of installed hooks
//!
//! The re-export index is the primary record of what is installed. Projects
//! that disable the index fall back to scanning the install root for files
//! that follow the hook naming convention.

use hookshelf_core::path::AbsPath;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Index file names, in lookup order
pub const INDEX_FILES: [&str; 2] = ["index.ts", "index.js"];

/// Extensions tried when resolving an index line to a file, in order
pub const MODULE_EXTENSIONS: [&str; 2] = ["ts", "js"];

/// Extensions recognized as hook source files
pub const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// File name prefix shared by every hook
pub const HOOK_PREFIX: &str = "use-";

static INDEX_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*export\s*\*\s*from\s*["']\./([^"']+)["']"#)
        .expect("index line pattern is valid")
});

/// One installed hook as seen on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledItem {
    /// Identifier derived from the file name
    pub id: String,
    /// Absolute path of the file (which may not exist, see doctor)
    pub path: AbsPath,
}

/// The index file of an install root, if one exists
pub fn find_index(install_root: &AbsPath) -> Option<AbsPath> {
    INDEX_FILES
        .iter()
        .map(|name| install_root.as_path().join(name))
        .find(|path| path.is_file())
        .and_then(|path| AbsPath::new(path).ok())
}

/// List installed hooks under `install_root`
///
/// A missing install root yields an empty list.
///
/// # Errors
///
/// Returns an error if the index file or the install root cannot be read
pub fn list(install_root: &AbsPath) -> Result<Vec<InstalledItem>> {
    if !install_root.as_path().is_dir() {
        tracing::debug!(root = %install_root, "Install root does not exist");
        return Ok(Vec::new());
    }

    match find_index(install_root) {
        Some(index) => from_index(install_root, &index),
        None => scan(install_root),
    }
}

fn from_index(install_root: &AbsPath, index: &AbsPath) -> Result<Vec<InstalledItem>> {
    let content = std::fs::read_to_string(index.as_path()).map_err(|e| Error::FileRead {
        path: index.clone(),
        source: e,
    })?;

    let items = INDEX_LINE
        .captures_iter(&content)
        .map(|caps| {
            let name = &caps[1];
            InstalledItem {
                id: name.to_string(),
                path: locate_module(install_root, name),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(index = %index, count = items.len(), "Read inventory from index");
    Ok(items)
}

/// First existing `<name>.<ext>`; the first extension when none exists
fn locate_module(install_root: &AbsPath, name: &str) -> AbsPath {
    let candidates: Vec<AbsPath> = MODULE_EXTENSIONS
        .iter()
        .map(|ext| install_root.child(format!("{name}.{ext}")))
        .collect();

    candidates
        .iter()
        .find(|path| path.as_path().is_file())
        .unwrap_or(&candidates[0])
        .clone()
}

fn scan(install_root: &AbsPath) -> Result<Vec<InstalledItem>> {
    let mut items = Vec::new();

    for entry in WalkDir::new(install_root.as_path()).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::DirectoryRead {
            path: install_root.clone(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() || !is_hook_file(entry.path()) {
            continue;
        }

        let Some(id) = entry.path().file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        items.push(InstalledItem {
            id: id.to_string(),
            path: AbsPath::new(entry.path().to_path_buf())?,
        });
    }

    tracing::debug!(root = %install_root, count = items.len(), "Scanned install root");
    Ok(items)
}

/// Whether a file follows the hook naming convention (`use-*.{ts,tsx,js,jsx}`)
pub fn is_hook_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    stem.len() > HOOK_PREFIX.len()
        && stem.starts_with(HOOK_PREFIX)
        && !stem.contains('.')
        && SOURCE_EXTENSIONS.contains(&ext)
}

/// Whether a file has one of the recognized source extensions
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root(temp: &TempDir) -> AbsPath {
        AbsPath::new(temp.path().join("src/hooks")).unwrap()
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list(&root(&temp)).unwrap().is_empty());
    }

    #[test]
    fn test_list_from_index_in_file_order() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::create_dir_all(root.as_path()).unwrap();
        fs::write(root.as_path().join("use-b.ts"), "").unwrap();
        fs::write(root.as_path().join("use-a.js"), "").unwrap();
        fs::write(
            root.as_path().join("index.ts"),
            "export * from \"./use-b\";\nexport * from './use-a';\nexport * from \"./use-gone\";\n",
        )
        .unwrap();

        let items = list(&root).unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["use-b", "use-a", "use-gone"]);
        assert!(items[0].path.as_path().ends_with("use-b.ts"));
        assert!(items[1].path.as_path().ends_with("use-a.js"));
        // Unresolvable entries report the first candidate so doctor can flag them
        assert!(items[2].path.as_path().ends_with("use-gone.ts"));
    }

    #[test]
    fn test_index_ts_wins_over_index_js() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::create_dir_all(root.as_path()).unwrap();
        fs::write(root.as_path().join("index.ts"), "export * from \"./use-ts\";\n").unwrap();
        fs::write(root.as_path().join("index.js"), "export * from \"./use-js\";\n").unwrap();

        let ids: Vec<_> = list(&root).unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["use-ts"]);
    }

    #[test]
    fn test_scan_without_index() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::create_dir_all(root.as_path().join("nested")).unwrap();
        fs::write(root.as_path().join("use-b.tsx"), "").unwrap();
        fs::write(root.as_path().join("use-a.ts"), "").unwrap();
        fs::write(root.as_path().join("nested/use-c.jsx"), "").unwrap();
        fs::write(root.as_path().join("helpers.ts"), "").unwrap();
        fs::write(root.as_path().join("use-a.ts.bak"), "").unwrap();
        fs::write(root.as_path().join("use-d.test.ts"), "").unwrap();

        // Walk order: entries sorted by name, directories descended in place
        let ids: Vec<_> = list(&root).unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["use-c", "use-a", "use-b"]);
    }

    #[test]
    fn test_is_hook_file() {
        assert!(is_hook_file(Path::new("use-debounce.ts")));
        assert!(is_hook_file(Path::new("/x/use-media-query.jsx")));
        assert!(!is_hook_file(Path::new("use-.ts")));
        assert!(!is_hook_file(Path::new("index.ts")));
        assert!(!is_hook_file(Path::new("use-x.css")));
        assert!(!is_hook_file(Path::new("use-x.ts.bak")));
    }

    #[test]
    fn test_has_source_extension() {
        assert!(has_source_extension(Path::new("index.ts")));
        assert!(has_source_extension(Path::new("helpers.jsx")));
        assert!(!has_source_extension(Path::new("use-x.ts.bak")));
        assert!(!has_source_extension(Path::new("README.md")));
    }
}
