//! Logging configuration for the hookshelf CLI
//!
//! Terminal diagnostics go to stderr so that command output on stdout stays
//! pipeable (`hookshelf list --json | jq`). An optional log file receives
//! everything at debug level.

use crate::Result;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging on the terminal
/// * `log_file` - Optional path to append logs to
///
/// # Examples
/// ```ignore
/// // Warnings and errors only
/// init(false, None)?;
///
/// // Verbose mode, also written to a file
/// init(true, Some(Path::new("hookshelf.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    // RUST_LOG wins over the verbosity flag
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!(
                "hookshelf={level},hookshelf_engine={level},hookshelf_registry={level},hookshelf_config={level}"
            ))
        })
        .expect("failed to create default env filter");

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .with_ansi(true)
        .with_filter(env_filter);

    match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .pretty()
                .with_filter(EnvFilter::try_new("debug").expect("'debug' is a valid filter"));

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| hookshelf_core::Error::Message(format!("Failed to init logging: {e}")))?;
        }
        None => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .try_init()
                .map_err(|e| hookshelf_core::Error::Message(format!("Failed to init logging: {e}")))?;
        }
    }

    Ok(())
}
