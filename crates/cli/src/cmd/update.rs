//! Update command implementation
//!
//! Reinstall hooks at the registry's current version. Replaced files are
//! backed up as `<file>.bak` unless `--force` is given.

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::{Reconciler, inventory};

use crate::cmd::print_install_report;
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;

/// Reinstall hooks from the registry
#[derive(Debug, Clone, Args)]
pub struct UpdateCommand {
    /// Hook ids to update (default: every installed hook known to the registry)
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    /// Show what would be written without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Overwrite without keeping backups
    #[arg(short, long)]
    pub force: bool,
}

impl Command for UpdateCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;

        let ids: Vec<String> = if self.ids.is_empty() {
            let root = context.install_root()?;
            inventory::list(&root)?
                .into_iter()
                .map(|item| item.id)
                .filter(|id| {
                    let known = registry.contains(id);
                    if !known {
                        tracing::debug!(id = %id, "Skipping installed hook missing from registry");
                    }
                    known
                })
                .collect()
        } else {
            self.ids.clone()
        };

        if ids.is_empty() {
            println!("{} Nothing to update.", StatusIcon::Info.get().blue());
            return Ok(());
        }

        let options = context.install_options(self.dry_run, self.force, false);
        let reconciler = Reconciler::new(&context.project, &context.remote, &registry);

        for id in &ids {
            let report = reconciler.update(id, &options)?;
            print_install_report(&report, context.project.root(), self.dry_run);
        }

        if self.dry_run {
            println!("\n{}", "Dry run: nothing was written.".dimmed());
        }
        Ok(())
    }
}
