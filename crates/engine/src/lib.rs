//! # Hookshelf Engine
//!
//! Core library of the hookshelf installer.
//!
//! This crate turns registry hooks into files inside a project and keeps the
//! local state consistent with the registry:
//!
//! - **Rewrite**: alias imports become paths relative to the installed file
//! - **Header**: identity and version marker on the first line of each file
//! - **Inventory**: what is installed, from the re-export index or a scan
//! - **Reconcile**: install, update, remove, preset install and migrate
//! - **Check**: outdated and doctor reports against the registry
//! - **Search**: query the registry with metadata fetched in parallel
//! - **System Abstraction**: filesystem writes behind a trait

pub mod check;
pub mod error;
pub mod header;
pub mod inventory;
pub mod pool;
pub mod reconcile;
pub mod rewrite;
pub mod search;
pub mod system;
pub mod version;

// Re-export path types from core
pub use hookshelf_core::path::{AbsPath, RelPath};

pub use error::{Error, Result};

// Re-export commonly used types
pub use check::{DoctorIssue, DoctorReport, IssueKind, OutdatedItem, doctor, outdated};
pub use header::HeaderInfo;
pub use inventory::InstalledItem;
pub use reconcile::{FileAction, InstallOptions, InstallReport, Reconciler, migrate};
pub use search::{SearchHit, search};
pub use system::{RealSystem, System};
