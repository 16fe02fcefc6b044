//! Type-safe path types and lexical path arithmetic
//!
//! This module provides two distinct path types using the newtype pattern:
//!
//! - [`AbsPath`]: Absolute filesystem paths (install roots, installed files)
//! - [`RelPath`]: Relative paths (registry destinations, subpaths under a root)
//!
//! It also provides purely lexical helpers ([`normalize`], [`relative_to`]) that
//! never touch the filesystem. Installed files frequently do not exist yet when
//! their paths are computed, so `canonicalize` is not an option.
//!
//! # Examples
//!
//! ```
//! use hookshelf_core::path::{AbsPath, RelPath};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = AbsPath::new("/work/app/src/hooks".into())?;
//! let dest = root.child("dom/use-debounce.ts");
//!
//! let rel: RelPath = dest.strip_prefix(&root)?;
//! assert_eq!(rel.as_path().to_str().unwrap(), "dom/use-debounce.ts");
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// An absolute path on the filesystem
///
/// This type guarantees that the path is absolute (starts with `/` on Unix or a drive letter on Windows).
/// Use this for file operations and as base directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use hookshelf_core::path::AbsPath;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let abs = AbsPath::new("/home/user".into())?;
    /// assert!(abs.as_path().is_absolute());
    ///
    /// let err = AbsPath::new("relative/path".into());
    /// assert!(err.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(AbsPath(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Resolve `path` against `base` and normalize the result lexically
    ///
    /// Absolute inputs ignore `base`. This is how configured directories
    /// (`baseDir`, `aliasTarget`, a migrate destination) become absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved path is still not absolute, which only
    /// happens when `base` itself is relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use hookshelf_core::path::AbsPath;
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let root = AbsPath::resolve(Path::new("/work/app"), Path::new("./src/../lib/hooks"))?;
    /// assert_eq!(root.as_path(), Path::new("/work/app/lib/hooks"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(base: &Path, path: &Path) -> Result<Self> {
        if path.is_absolute() {
            Self::new(normalize(path))
        } else {
            Self::new(normalize(&base.join(path)))
        }
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join a file name or plain subpath
    #[must_use]
    pub fn child(&self, name: impl AsRef<Path>) -> Self {
        AbsPath(normalize(&self.0.join(name)))
    }

    /// Get the parent directory
    ///
    /// Returns `None` if this is the root directory.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| AbsPath(p.to_path_buf()))
    }

    /// Strip a base directory prefix to get a relative path
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not under `base`.
    pub fn strip_prefix(&self, base: &AbsPath) -> Result<RelPath> {
        self.0
            .strip_prefix(&base.0)
            .map(|p| RelPath(p.to_path_buf()))
            .map_err(|_| Error::InvalidPathPrefix {
                path: std::sync::Arc::new(self.as_path().to_path_buf()),
                base: std::sync::Arc::new(base.as_path().to_path_buf()),
            })
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }

    /// Get the file name without its final extension
    pub fn file_stem(&self) -> Option<&str> {
        self.0.file_stem().and_then(|s| s.to_str())
    }

    /// Get the final extension, if any
    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|s| s.to_str())
    }

    /// Append a suffix to the file name (`use-x.ts` → `use-x.ts.bak`)
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut raw = self.0.clone().into_os_string();
        raw.push(suffix);
        AbsPath(PathBuf::from(raw))
    }
}

/// A relative path (no leading slash)
///
/// This type guarantees that the path is relative (does not start with `/`).
/// Use this for paths relative to a base directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelPath(PathBuf);

impl RelPath {
    /// Create a new `RelPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_relative() {
            Ok(RelPath(path))
        } else {
            Err(Error::PathNotRelative { path })
        }
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

}

/// Normalize a path lexically: drop `.` components and fold `..` into their parent
///
/// Leading `..` components of a relative path are preserved since there is
/// nothing to fold them into; `..` directly under the root is dropped.
///
/// # Examples
///
/// ```
/// use hookshelf_core::path::normalize;
/// use std::path::Path;
///
/// assert_eq!(normalize(Path::new("src/routes/../utils/./auth")), Path::new("src/utils/auth"));
/// assert_eq!(normalize(Path::new("../lib")), Path::new("../lib"));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.iter().map(|c| c.as_os_str()).collect()
}

/// Compute the path of `target` relative to the directory `base_dir`
///
/// Both inputs are normalized first. The result uses `..` to climb out of
/// `base_dir` where needed and is empty when both paths are equal.
///
/// # Examples
///
/// ```
/// use hookshelf_core::path::relative_to;
/// use std::path::Path;
///
/// let rel = relative_to(Path::new("/app/src/lib/utils"), Path::new("/app/src/hooks"));
/// assert_eq!(rel, Path::new("../lib/utils"));
/// ```
pub fn relative_to(target: &Path, base_dir: &Path) -> PathBuf {
    let target = normalize(target);
    let base = normalize(base_dir);

    let target_parts: Vec<_> = target.components().collect();
    let base_parts: Vec<_> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel
}

impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
