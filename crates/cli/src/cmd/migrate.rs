//! Migrate command implementation
//!
//! Copy installed hooks into a new base directory and point the project
//! configuration at it. The old directory is left in place.

use clap::Args;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use hookshelf_engine::{RealSystem, migrate};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;

/// Move installed hooks to a new base directory
#[derive(Debug, Clone, Args)]
pub struct MigrateCommand {
    /// New base directory, relative to the project root
    #[arg(value_name = "DIR")]
    pub new_base: PathBuf,
}

impl Command for MigrateCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        // The configuration is rewritten, so work on an owned copy
        let mut project = context.project.clone();
        let report = migrate(&RealSystem, &mut project, &self.new_base)?;

        if report.unchanged {
            println!(
                "{} Hooks already live in {}",
                StatusIcon::Info.get().blue(),
                report.to.to_string().cyan()
            );
            return Ok(());
        }

        println!(
            "{} Copied {} file(s) from {} to {}",
            StatusIcon::Success.get().green(),
            report.copied.len(),
            report.from.to_string().dimmed(),
            report.to.to_string().cyan()
        );
        println!(
            "  {} now points at {}",
            project.config_path().display(),
            project.config().base_dir.display().bold()
        );
        println!(
            "  {}",
            "The old directory was left in place; remove it once imports are updated.".dimmed()
        );
        Ok(())
    }
}
