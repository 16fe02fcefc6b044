//! Error types for CLI commands
//!
//! Library errors are kept structured up to the command boundary; anything
//! else travels through the `Other` variant with `anyhow` context attached.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Install, check or migrate operation failed
    #[error(transparent)]
    Engine(#[from] hookshelf_engine::Error),

    /// Registry could not be read
    #[error(transparent)]
    Registry(#[from] hookshelf_registry::Error),

    /// Project configuration could not be read or written
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Doctor found inconsistencies
    #[error("Doctor found {issues} issue(s) in {checked} installed hook(s)")]
    Unhealthy {
        /// Number of issues reported
        issues: usize,
        /// Number of hooks checked
        checked: usize,
    },

    /// Interactive prompt failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// JSON output could not be produced
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<hookshelf_core::Error> for CommandError {
    fn from(err: hookshelf_core::Error) -> Self {
        match err {
            hookshelf_core::Error::Io(e) => Self::IoError(e),
            other => Self::config(other),
        }
    }
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Create a `ConfigError` from any error type
    pub fn config<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::ConfigError(Box::new(err))
    }
}
