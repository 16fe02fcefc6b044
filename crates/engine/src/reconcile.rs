//! Install, update, remove and migrate installed hooks
//!
//! Every operation is atomic per file only. A failure partway through a
//! multi-file hook leaves the files already written in place; there is no
//! rollback and no retry.

use hookshelf_config::Project;
use hookshelf_core::path::AbsPath;
use hookshelf_registry::{HookEntry, HookMetadata, Registry, Remote};
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::header;
use crate::inventory::{INDEX_FILES, find_index, has_source_extension};
use crate::rewrite::rewrite_imports;
use crate::system::{RealSystem, System};

/// Directory prefix registry metadata uses for destinations
///
/// `hooks/use-x.ts` in metadata lands at `<install root>/use-x.ts`.
pub const CANONICAL_ROOT: &str = "hooks/";

/// Suffix appended to backups of overwritten files
pub const BACKUP_SUFFIX: &str = ".bak";

/// Options shared by install, update and preset installs
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Only compute destinations; fetch no sources, write nothing
    pub dry_run: bool,
    /// Overwrite existing files without keeping a `.bak` copy
    pub force: bool,
    /// Drop a leading `"use client";` directive
    pub strip_directive: bool,
}

/// What happened to one destination file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Dry run: the file would be written here
    Planned,
    /// The file did not exist and was created
    Created,
    /// The file existed and was overwritten
    Replaced {
        /// Copy of the previous content, unless forced
        backup: Option<AbsPath>,
    },
}

/// One destination file of an install
#[derive(Debug, Clone)]
pub struct InstalledFile {
    /// Absolute destination
    pub path: AbsPath,
    /// Outcome
    pub action: FileAction,
}

/// Outcome of installing one hook
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Hook id
    pub id: String,
    /// Hook version written into the headers
    pub version: String,
    /// Files, in metadata order
    pub files: Vec<InstalledFile>,
    /// Index file that received a new re-export line
    pub index: Option<AbsPath>,
}

/// Outcome of removing one hook
#[derive(Debug, Clone, Default)]
pub struct RemoveReport {
    /// Files that were deleted
    pub removed: Vec<AbsPath>,
    /// Destinations that were already absent
    pub missing: Vec<AbsPath>,
    /// Index files that had lines pruned
    pub index_updated: Vec<AbsPath>,
}

/// Outcome of a migration
#[derive(Debug, Clone)]
pub struct MigrateReport {
    /// Previous install root
    pub from: AbsPath,
    /// New install root
    pub to: AbsPath,
    /// Files copied into the new root
    pub copied: Vec<AbsPath>,
    /// Whether the new root equals the old one (nothing done)
    pub unchanged: bool,
}

/// Applies registry hooks to a project
pub struct Reconciler<'a, S: System = RealSystem> {
    project: &'a Project,
    remote: &'a Remote,
    registry: &'a Registry,
    system: S,
}

impl<'a> Reconciler<'a, RealSystem> {
    /// Create a reconciler writing to the real filesystem
    pub fn new(project: &'a Project, remote: &'a Remote, registry: &'a Registry) -> Self {
        Self::with_system(project, remote, registry, RealSystem)
    }
}

impl<'a, S: System> Reconciler<'a, S> {
    /// Create a reconciler over a custom [`System`]
    pub fn with_system(
        project: &'a Project,
        remote: &'a Remote,
        registry: &'a Registry,
        system: S,
    ) -> Self {
        Self {
            project,
            remote,
            registry,
            system,
        }
    }

    /// Install a hook
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHook`] before any I/O if `id` is not in the
    /// registry; otherwise any fetch or filesystem failure aborts the install
    pub fn install(&self, id: &str, options: &InstallOptions) -> Result<InstallReport> {
        let entry = self.entry(id)?;
        let meta = self.remote.metadata(entry)?;
        let root = self.project.install_root()?;

        tracing::debug!(id, version = %meta.version, files = meta.files.len(), "Installing hook");

        let mut files = Vec::with_capacity(meta.files.len());
        for file in &meta.files {
            let dest = remap_destination(&root, &file.dest)?;

            if options.dry_run {
                files.push(InstalledFile {
                    path: dest,
                    action: FileAction::Planned,
                });
                continue;
            }

            let source = self.remote.file(entry, &file.src)?;
            let content = self.render(&source, entry, &meta, &dest, options);
            let action = self.write_with_backup(&dest, &content, options.force)?;
            files.push(InstalledFile { path: dest, action });
        }

        let index = match files.last() {
            Some(last) if !options.dry_run && self.project.config().add_index => {
                self.add_to_index(&root, &last.path)?
            }
            _ => None,
        };

        tracing::info!(id, version = %meta.version, "Installed hook");
        Ok(InstallReport {
            id: entry.id.clone(),
            version: meta.version,
            files,
            index,
        })
    }

    /// Reinstall the latest registry version of a hook
    ///
    /// Always refetches; no local version comparison is made.
    ///
    /// # Errors
    ///
    /// Same as [`Reconciler::install`]
    pub fn update(&self, id: &str, options: &InstallOptions) -> Result<InstallReport> {
        tracing::debug!(id, force = options.force, "Updating hook");
        self.install(id, options)
    }

    /// Hook ids of a registry preset, each checked against the registry
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] or [`Error::UnknownHook`]; no I/O is done
    pub fn preset_ids(&self, name: &str) -> Result<&'a [String]> {
        let ids = self
            .registry
            .preset(name)
            .ok_or_else(|| Error::UnknownPreset {
                name: name.to_string(),
            })?;

        for id in ids {
            self.entry(id)?;
        }
        Ok(ids)
    }

    /// Install every hook of a registry preset, in preset order
    ///
    /// All ids are checked against the registry before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] or [`Error::UnknownHook`] before any
    /// I/O, or the first install failure
    pub fn install_preset(&self, name: &str, options: &InstallOptions) -> Result<Vec<InstallReport>> {
        self.preset_ids(name)?
            .iter()
            .map(|id| self.install(id, options))
            .collect()
    }

    /// Remove an installed hook and prune its index lines
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHook`] if `id` is not in the registry, or any
    /// fetch or filesystem failure
    pub fn remove(&self, id: &str) -> Result<RemoveReport> {
        let entry = self.entry(id)?;
        let meta = self.remote.metadata(entry)?;
        let root = self.project.install_root()?;

        let mut report = RemoveReport::default();
        let mut names = Vec::new();

        for file in &meta.files {
            let dest = remap_destination(&root, &file.dest)?;
            if let Some(stem) = dest.file_stem() {
                names.push(stem.to_string());
            }

            if self.system.is_file(&dest) {
                self.system.remove_file(&dest)?;
                tracing::debug!(path = %dest, "Removed file");
                report.removed.push(dest);
            } else {
                report.missing.push(dest);
            }
        }

        for index_name in INDEX_FILES {
            let index = root.child(index_name);
            if !self.system.is_file(&index) {
                continue;
            }

            let content = self.system.read_to_string(&index)?;
            let mut pruned = content.clone();
            for name in &names {
                pruned = remove_index_line(&pruned, name)?;
            }

            if pruned != content {
                self.system.write_file(&index, &pruned)?;
                report.index_updated.push(index);
            }
        }

        tracing::info!(id, removed = report.removed.len(), "Removed hook");
        Ok(report)
    }

    fn entry(&self, id: &str) -> Result<&'a HookEntry> {
        self.registry.find(id).ok_or_else(|| Error::UnknownHook { id: id.to_string() })
    }

    fn render(
        &self,
        source: &str,
        entry: &HookEntry,
        meta: &HookMetadata,
        dest: &AbsPath,
        options: &InstallOptions,
    ) -> String {
        let source = if options.strip_directive {
            strip_use_client(source)
        } else {
            source
        };

        let alias = self.project.config().alias();
        let rewritten = rewrite_imports(source, alias.as_ref(), dest, self.project.root());

        header::prepend(&rewritten, &entry.id, &meta.version, &self.registry.version)
    }

    fn write_with_backup(&self, dest: &AbsPath, content: &str, force: bool) -> Result<FileAction> {
        let action = if self.system.exists(dest) {
            let backup = if force {
                None
            } else {
                let backup = dest.with_suffix(BACKUP_SUFFIX);
                self.system.copy_file(dest, &backup)?;
                tracing::debug!(path = %backup, "Backed up existing file");
                Some(backup)
            };
            FileAction::Replaced { backup }
        } else {
            FileAction::Created
        };

        self.system.write_file(dest, content)?;
        tracing::debug!(path = %dest, "Wrote file");
        Ok(action)
    }

    /// Append the re-export line for `file`, creating the index when absent
    fn add_to_index(&self, root: &AbsPath, file: &AbsPath) -> Result<Option<AbsPath>> {
        let Some(name) = file.file_stem() else {
            return Ok(None);
        };
        let line = index_line(name);

        let index = find_index(root).unwrap_or_else(|| {
            root.child(match file.extension() {
                Some("js" | "jsx") => INDEX_FILES[1],
                _ => INDEX_FILES[0],
            })
        });

        let mut content = if self.system.exists(&index) {
            self.system.read_to_string(&index)?
        } else {
            String::new()
        };

        if content.lines().any(|existing| existing.trim_end() == line) {
            return Ok(None);
        }

        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&line);
        content.push('\n');

        self.system.write_file(&index, &content)?;
        tracing::debug!(index = %index, name, "Added index entry");
        Ok(Some(index))
    }
}

/// Copy every source file of the current install root into `new_base` and
/// point the configuration at it
///
/// The copy is flat: files land directly under the new root by file name.
/// The old root is left untouched and the index is not regenerated.
///
/// # Errors
///
/// Returns an error if a file cannot be copied or the configuration cannot
/// be saved
pub fn migrate<S: System>(system: &S, project: &mut Project, new_base: &Path) -> Result<MigrateReport> {
    let from = project.install_root()?;
    let to = project.resolve(new_base)?;

    if from == to {
        tracing::info!(root = %from, "Install root unchanged, nothing to migrate");
        return Ok(MigrateReport {
            from,
            to,
            copied: Vec::new(),
            unchanged: true,
        });
    }

    system.create_dir_all(&to)?;

    // Collect before copying so a new root nested inside the old one is not re-walked
    let mut sources = Vec::new();
    if from.as_path().is_dir() {
        for entry in WalkDir::new(from.as_path()).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: from.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && has_source_extension(path) && !path.starts_with(to.as_path()) {
                sources.push(AbsPath::new(path.to_path_buf())?);
            }
        }
    }

    let mut copied = Vec::with_capacity(sources.len());
    for source in sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = to.child(name);
        system.copy_file(&source, &target)?;
        tracing::debug!(from = %source, to = %target, "Copied file");
        copied.push(target);
    }

    let stored = to
        .as_path()
        .strip_prefix(project.root())
        .map_or_else(|_| to.as_path().to_path_buf(), Path::to_path_buf);
    project.config_mut().base_dir = stored;
    project.save()?;

    tracing::info!(from = %from, to = %to, files = copied.len(), "Migrated install root");
    Ok(MigrateReport {
        from,
        to,
        copied,
        unchanged: false,
    })
}

/// Map a metadata destination onto the install root
///
/// The canonical `hooks/` prefix is replaced by the root with any subpath
/// preserved. Other destinations are placed under the root as-is.
///
/// # Errors
///
/// Returns [`Error::InvalidPathPrefix`] if the destination escapes the root
pub fn remap_destination(root: &AbsPath, dest: &str) -> Result<AbsPath> {
    let dest = dest.replace('\\', "/");
    let dest = dest.trim_start_matches("./").trim_start_matches('/');
    let sub = dest.strip_prefix(CANONICAL_ROOT).unwrap_or(dest);

    let path = root.child(sub);
    path.strip_prefix(root)?;
    Ok(path)
}

/// The re-export line for a module in the install root
pub fn index_line(name: &str) -> String {
    format!("export * from \"./{name}\";")
}

/// Delete the exact re-export line for `name`, through its newline or end of input
///
/// # Errors
///
/// Returns an error only if the pattern cannot be compiled
pub fn remove_index_line(content: &str, name: &str) -> Result<String> {
    let pattern = format!(
        r#"(?m)^export \* from ["']\./{}["'];?[ \t]*(?:\r?\n|$)"#,
        regex::escape(name)
    );
    let regex = Regex::new(&pattern).map_err(|e| Error::Other {
        context: format!("Invalid index pattern for '{name}'"),
        source: Box::new(e),
    })?;
    Ok(regex.replace_all(content, "").into_owned())
}

/// Drop a leading `"use client";` directive
///
/// Only the very first non-blank line is considered; either quote style and
/// an optional semicolon are accepted.
pub fn strip_use_client(code: &str) -> &str {
    let rest = code.trim_start();
    let (line, after) = match rest.find('\n') {
        Some(end) => (&rest[..end], &rest[end + 1..]),
        None => (rest, ""),
    };

    let line = line.trim_end();
    let line = line.strip_suffix(';').unwrap_or(line).trim_end();
    if line == "\"use client\"" || line == "'use client'" {
        after
    } else {
        code
    }
}
