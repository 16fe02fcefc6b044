//! Core types and utilities for hookshelf
//!
//! This is the foundation crate (Layer 0) that all other hookshelf crates depend on.
//! It provides:
//! - Path types (AbsPath, RelPath)
//! - Lexical path arithmetic (normalization, relative paths)
//! - Base error types
//!
//! This crate has no dependencies on other hookshelf crates.

pub mod error;
pub mod path;

pub use error::{Error, Result};
