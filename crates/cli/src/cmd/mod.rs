//! CLI command implementations
//!
//! This module contains all command implementations for the hookshelf CLI.

pub mod add;
pub mod doctor;
pub mod info;
pub mod init;
pub mod list;
pub mod migrate;
pub mod outdated;
pub mod preset;
pub mod readme;
pub mod remove;
pub mod search;
pub mod update;

use owo_colors::OwoColorize;
use std::path::Path;

use hookshelf_engine::reconcile::{FileAction, InstallReport};

use crate::ui::StatusIcon;

/// Print the per-file outcome of an install or update
pub(crate) fn print_install_report(report: &InstallReport, root: &Path, dry_run: bool) {
    let verb = if dry_run { "Would install" } else { "Installed" };

    println!(
        "{} {} {}@{}",
        StatusIcon::Success.get().green(),
        verb,
        report.id.bold(),
        report.version
    );

    for file in &report.files {
        let shown = file
            .path
            .as_path()
            .strip_prefix(root)
            .unwrap_or(file.path.as_path());
        match &file.action {
            FileAction::Planned => println!("    {} {}", "~".dimmed(), shown.display()),
            FileAction::Created => println!("    {} {}", "+".green(), shown.display()),
            FileAction::Replaced { backup: Some(backup) } => println!(
                "    {} {} (backup: {})",
                "~".yellow(),
                shown.display(),
                backup.file_name().unwrap_or_default().dimmed()
            ),
            FileAction::Replaced { backup: None } => {
                println!("    {} {}", "~".yellow(), shown.display());
            }
        }
    }

    if let Some(index) = &report.index {
        let shown = index.as_path().strip_prefix(root).unwrap_or(index.as_path());
        println!("    {} {}", "index".dimmed(), shown.display());
    }
}
