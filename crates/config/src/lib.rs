//! Configuration management for hookshelf
//!
//! This crate handles:
//! - Project configuration discovery, defaults and persistence
//! - Logging initialization

pub mod config;
pub mod logging;

// Re-export error types from core
pub use hookshelf_core::{Error, Result};

// Re-export main types
pub use config::{AliasRule, CONFIG_FILE_NAME, Project, ProjectConfig};
