//! Project configuration
//!
//! This module handles discovering, loading and saving the `hookshelf.json`
//! file that lives at the root of a project. The file is optional: every
//! command falls back to built-in defaults when it is absent.

use crate::Result;
use hookshelf_core::path::AbsPath;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file at the project root
pub const CONFIG_FILE_NAME: &str = "hookshelf.json";

/// Persisted project configuration
///
/// ```json
/// {
///   "baseDir": "src/hooks",
///   "addIndex": true,
///   "stripUseClient": false,
///   "aliasPrefix": "@/",
///   "aliasTarget": "src"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Install root, relative to the project root
    #[serde(default = "default_base_dir", rename = "baseDir")]
    pub base_dir: PathBuf,

    /// Maintain a re-export index file in the install root
    #[serde(default = "default_add_index", rename = "addIndex")]
    pub add_index: bool,

    /// Strip a leading `"use client";` directive from installed files
    #[serde(default, rename = "stripUseClient")]
    pub strip_use_client: bool,

    /// Symbolic import prefix to rewrite (e.g. `@/`)
    #[serde(
        default,
        rename = "aliasPrefix",
        skip_serializing_if = "Option::is_none"
    )]
    pub alias_prefix: Option<String>,

    /// Directory the alias prefix points at, relative to the project root
    #[serde(
        default,
        rename = "aliasTarget",
        skip_serializing_if = "Option::is_none"
    )]
    pub alias_target: Option<PathBuf>,

    /// Registry location override (URL or local directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("src/hooks")
}

fn default_add_index() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            add_index: default_add_index(),
            strip_use_client: false,
            alias_prefix: None,
            alias_target: None,
            registry: None,
        }
    }
}

/// An import alias rewrite rule: `prefix` imports resolve inside `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    /// Import prefix, always ending with `/`
    pub prefix: String,
    /// Directory the prefix maps to, relative to the project root
    pub target: PathBuf,
}

impl AliasRule {
    /// Create a rule, normalizing the prefix to end with a separator
    pub fn new(prefix: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self {
            prefix,
            target: target.into(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or JSON parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            hookshelf_core::Error::Config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_json_str(&content).map_err(|e| {
            hookshelf_core::Error::Config(format!("{} ({})", e, path.as_ref().display()))
        })
    }

    /// Parse configuration from a JSON string
    ///
    /// Unknown keys are ignored and missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the content is not a JSON object of the expected shape
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            hookshelf_core::Error::Config(format!("Failed to parse config JSON: {e}"))
        })
    }

    /// Save configuration to a file as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self).map_err(|e| {
            hookshelf_core::Error::Config(format!("Failed to serialize config: {e}"))
        })?;
        content.push('\n');

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| {
                hookshelf_core::Error::Config(format!(
                    "Failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(path.as_ref(), content).map_err(|e| {
            hookshelf_core::Error::Config(format!(
                "Failed to write config file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Ok(())
    }

    /// The alias rewrite rule, when both halves are configured
    ///
    /// An empty prefix or target counts as absent.
    pub fn alias(&self) -> Option<AliasRule> {
        let prefix = self.alias_prefix.as_deref().filter(|p| !p.is_empty())?;
        let target = self
            .alias_target
            .as_deref()
            .filter(|t| !t.as_os_str().is_empty())?;
        Some(AliasRule::new(prefix, target))
    }
}

/// A project: its root directory plus the configuration that applies to it
///
/// Loaded once per command invocation and passed explicitly to every
/// operation that needs it.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
    config_path: Option<PathBuf>,
}

impl Project {
    /// Create a project from an in-memory configuration
    ///
    /// Nothing is read from disk. `save` writes to `<root>/hookshelf.json`.
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
            config_path: None,
        }
    }

    /// Discover the project that contains `start`
    ///
    /// Walks upward from `start` looking for `hookshelf.json`. The directory
    /// holding the first match becomes the project root. When the filesystem
    /// root is reached without a match, `start` is the root and defaults apply.
    ///
    /// # Errors
    ///
    /// Returns error if a configuration file is found but cannot be loaded
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Found project configuration");
                let config = ProjectConfig::load(&candidate)?;
                return Ok(Self {
                    root: dir.to_path_buf(),
                    config,
                    config_path: Some(candidate),
                });
            }
        }

        tracing::debug!(
            start = %start.display(),
            "No {} found, using defaults",
            CONFIG_FILE_NAME
        );
        Ok(Self::new(start, ProjectConfig::default()))
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Active configuration
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Mutable access to the configuration
    pub fn config_mut(&mut self) -> &mut ProjectConfig {
        &mut self.config
    }

    /// Where the configuration lives (or will be written)
    pub fn config_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE_NAME))
    }

    /// Absolute install root (`root` + `baseDir`)
    ///
    /// # Errors
    ///
    /// Returns error if the project root is not absolute
    pub fn install_root(&self) -> Result<AbsPath> {
        AbsPath::resolve(&self.root, &self.config.base_dir)
    }

    /// Resolve any project-relative directory to an absolute path
    ///
    /// # Errors
    ///
    /// Returns error if the project root is not absolute
    pub fn resolve(&self, path: &Path) -> Result<AbsPath> {
        AbsPath::resolve(&self.root, path)
    }

    /// Persist the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn save(&mut self) -> Result<()> {
        let path = self.config_path();
        self.config.save(&path)?;
        tracing::debug!(path = %path.display(), "Saved project configuration");
        self.config_path = Some(path);
        Ok(())
    }
}
