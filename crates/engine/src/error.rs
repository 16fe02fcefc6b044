//! Error types for hookshelf-engine
//!
//! Registry and path failures from the lower crates convert into [`Error`]
//! so that every reconciler and checker operation returns a single type.

use hookshelf_core::path::AbsPath;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hookshelf-engine
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading a file
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a directory
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error walking a directory
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// The requested hook is not in the registry
    #[error("Unknown hook: {id}")]
    UnknownHook { id: String },

    /// The requested preset is not in the registry
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    /// Registry access failed
    #[error(transparent)]
    Registry(#[from] hookshelf_registry::Error),

    /// Path is not absolute
    #[error("Path must be absolute: {path}")]
    PathNotAbsolute { path: PathBuf },

    /// Invalid path prefix
    #[error("Path {} is not under base directory {}", path.display(), base.display())]
    InvalidPathPrefix {
        path: Arc<PathBuf>,
        base: Arc<PathBuf>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    Other {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// Convert from hookshelf_core::Error
impl From<hookshelf_core::Error> for Error {
    fn from(err: hookshelf_core::Error) -> Self {
        match err {
            hookshelf_core::Error::PathNotAbsolute { path } => Error::PathNotAbsolute { path },
            hookshelf_core::Error::InvalidPathPrefix { path, base } => {
                Error::InvalidPathPrefix { path, base }
            }
            hookshelf_core::Error::Io(e) => Error::Io(e),
            _ => Error::Other {
                context: "Project error".to_string(),
                source: Box::new(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_unknown_hook_message() {
        let err = Error::UnknownHook {
            id: "use-ghost".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown hook: use-ghost");
    }

    #[test]
    fn test_from_core_error() {
        let err: Error = hookshelf_core::Error::PathNotAbsolute {
            path: PathBuf::from("rel"),
        }
        .into();
        assert!(matches!(err, Error::PathNotAbsolute { .. }));

        let err: Error = hookshelf_core::Error::Config("bad json".to_string()).into();
        assert!(err.to_string().contains("bad json"));
    }

    #[test]
    fn test_registry_error_is_transparent() {
        let fetch = hookshelf_registry::FetchError::new(404, "https://x.dev/registry.json");
        let err: Error = hookshelf_registry::Error::from(fetch).into();
        assert!(err.to_string().contains("404"));
    }
}
