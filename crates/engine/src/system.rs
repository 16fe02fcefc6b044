//! System abstraction for filesystem operations
//!
//! Every write, copy and delete the reconciler and migration make goes
//! through a [`System`], so errors carry the path that failed. Read-only
//! discovery does not: [`crate::inventory`] and the source walk in
//! [`crate::migrate`] read the filesystem with `std::fs` and `walkdir`.

use crate::error::{Error, Result};
use hookshelf_core::path::AbsPath;
use std::fs;

/// Abstraction over filesystem operations
pub trait System: Send + Sync {
    /// Read a file's contents as text
    fn read_to_string(&self, path: &AbsPath) -> Result<String>;

    /// Write a file, creating parent directories as needed
    fn write_file(&self, path: &AbsPath, content: &str) -> Result<()>;

    /// Copy a file, overwriting the destination
    fn copy_file(&self, from: &AbsPath, to: &AbsPath) -> Result<()>;

    /// Create a directory and all of its parents
    fn create_dir_all(&self, path: &AbsPath) -> Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &AbsPath) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &AbsPath) -> bool;

    /// Check if a path is a regular file
    fn is_file(&self, path: &AbsPath) -> bool;
}

/// Real filesystem implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSystem;

impl System for RealSystem {
    fn read_to_string(&self, path: &AbsPath) -> Result<String> {
        fs::read_to_string(path.as_path()).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })
    }

    fn write_file(&self, path: &AbsPath, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(&parent)?;
        }

        fs::write(path.as_path(), content).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })
    }

    fn copy_file(&self, from: &AbsPath, to: &AbsPath) -> Result<()> {
        if let Some(parent) = to.parent() {
            self.create_dir_all(&parent)?;
        }

        fs::copy(from.as_path(), to.as_path())
            .map(|_| ())
            .map_err(|e| Error::FileWrite {
                path: to.clone(),
                source: e,
            })
    }

    fn create_dir_all(&self, path: &AbsPath) -> Result<()> {
        fs::create_dir_all(path.as_path()).map_err(|e| Error::DirectoryCreate {
            path: path.clone(),
            source: e,
        })
    }

    fn remove_file(&self, path: &AbsPath) -> Result<()> {
        fs::remove_file(path.as_path()).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })
    }

    fn exists(&self, path: &AbsPath) -> bool {
        path.as_path().exists()
    }

    fn is_file(&self, path: &AbsPath) -> bool {
        path.as_path().is_file()
    }
}
