//! Common utilities and types shared across CLI commands

use hookshelf_config::Project;
use hookshelf_core::path::AbsPath;
use hookshelf_engine::InstallOptions;
use hookshelf_registry::http::is_http_location;
use hookshelf_registry::{Registry, Remote};
use std::path::Path;

use crate::error::Result;
use crate::ui::create_spinner;

/// Registry used when neither the command line nor the project names one
pub const DEFAULT_REGISTRY: &str =
    "https://raw.githubusercontent.com/hookshelf/registry/main/registry.json";

/// Pick the registry location: command line (or `HOOKSHELF_REGISTRY`), then
/// project configuration, then the built-in default
///
/// A local path from the command line stays relative to the working
/// directory. A local path from `hookshelf.json` is relative to the project
/// root, wherever the command runs from.
pub fn resolve_registry_location(flag: Option<&str>, project: &Project) -> String {
    if let Some(flag) = flag.filter(|s| !s.trim().is_empty()) {
        return flag.to_string();
    }

    match project.config().registry.as_deref() {
        Some(loc) if is_http_location(loc) || loc.starts_with("file://") => loc.to_string(),
        Some(loc) => project
            .resolve(Path::new(loc))
            .map_or_else(|_| loc.to_string(), |path| path.to_string()),
        None => DEFAULT_REGISTRY.to_string(),
    }
}

/// Runtime context for CLI commands
///
/// Loaded once per invocation: the discovered project and the registry it
/// talks to. Nothing is fetched until a command asks for it.
pub struct RuntimeContext {
    /// Discovered project (defaults when unconfigured)
    pub project: Project,
    /// Registry remote
    pub remote: Remote,
}

impl RuntimeContext {
    /// Create a new runtime context
    pub fn new(project: Project, remote: Remote) -> Self {
        Self { project, remote }
    }

    /// Absolute install root of the project
    ///
    /// # Errors
    ///
    /// Returns an error if the project root is not absolute
    pub fn install_root(&self) -> Result<AbsPath> {
        Ok(self.project.install_root()?)
    }

    /// Fetch the registry index, showing a spinner while waiting
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is unreachable or malformed
    pub fn load_registry(&self) -> Result<Registry> {
        let spinner = create_spinner("Fetching registry...");
        let result = self.remote.registry();
        spinner.finish_and_clear();

        let registry = result?;
        tracing::debug!(
            location = self.remote.location(),
            hooks = registry.hooks.len(),
            version = %registry.version,
            "Loaded registry"
        );
        Ok(registry)
    }

    /// Install options from command flags, with the project's
    /// `stripUseClient` as the default for directive stripping
    pub fn install_options(&self, dry_run: bool, force: bool, strip_use_client: bool) -> InstallOptions {
        InstallOptions {
            dry_run,
            force,
            strip_directive: strip_use_client || self.project.config().strip_use_client,
        }
    }
}
