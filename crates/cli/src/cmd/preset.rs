//! Preset command implementation
//!
//! Without a name, list the registry's presets. With a name, install every
//! hook of that preset in order.

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::Reconciler;

use crate::cmd::print_install_report;
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// List presets or install one
#[derive(Debug, Clone, Args)]
pub struct PresetCommand {
    /// Preset to install (omit to list presets)
    pub name: Option<String>,

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

impl Command for PresetCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;

        let Some(name) = &self.name else {
            if registry.presets.is_empty() {
                println!("Registry {} defines no presets.", registry.name.bold());
                return Ok(());
            }
            for (preset, ids) in &registry.presets {
                println!("  {}  {}", preset.cyan(), ids.join(", ").dimmed());
            }
            return Ok(());
        };

        let options = context.install_options(self.dry_run, self.force, self.strip_use_client);
        let reconciler = Reconciler::new(&context.project, &context.remote, &registry);
        let ids = reconciler.preset_ids(name)?;

        // Report each hook as soon as it lands so a later failure still shows what was written
        for id in ids {
            let report = reconciler.install(id, &options)?;
            print_install_report(&report, context.project.root(), self.dry_run);
        }
        println!("\nPreset {}: {} hook(s)", name.bold(), ids.len());
        Ok(())
    }
}
