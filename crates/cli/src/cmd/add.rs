//! Add command implementation
//!
//! Install hooks from the registry into the project.

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::Reconciler;

use crate::cmd::print_install_report;
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Install one or more hooks
#[derive(Debug, Clone, Args)]
pub struct AddCommand {
    /// Hook ids to install
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<String>,

    /// Show what would be written without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Overwrite existing files without keeping a backup
    #[arg(short, long)]
    pub force: bool,

    /// Strip the "use client" directive (default from stripUseClient)
    #[arg(long)]
    pub strip_use_client: bool,
}

impl Command for AddCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;
        let options = context.install_options(self.dry_run, self.force, self.strip_use_client);
        let reconciler = Reconciler::new(&context.project, &context.remote, &registry);

        for id in &self.ids {
            let report = reconciler.install(id, &options)?;
            print_install_report(&report, context.project.root(), self.dry_run);
        }

        if self.dry_run {
            println!("\n{}", "Dry run: nothing was written.".dimmed());
        }
        Ok(())
    }
}
