//! Outdated command implementation
//!
//! Compare the version in each installed file's header with the registry.

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::{inventory, outdated};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::{StatusIcon, create_spinner};

/// Show installed hooks with a newer registry version
#[derive(Debug, Clone, Args)]
pub struct OutdatedCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Command for OutdatedCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;
        let items = inventory::list(&context.install_root()?)?;

        let spinner = create_spinner("Checking versions...");
        let result = outdated(&context.remote, &registry, &items);
        spinner.finish_and_clear();
        let stale = result?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stale)?);
            return Ok(());
        }

        if stale.is_empty() {
            println!(
                "{} All {} installed hook(s) are up to date",
                StatusIcon::Success.get().green(),
                items.len()
            );
            return Ok(());
        }

        let width = stale.iter().map(|s| s.id.len()).max().unwrap_or(0);
        for item in &stale {
            println!(
                "  {:<width$}  {} -> {}",
                item.id.cyan(),
                item.local.yellow(),
                item.remote.green()
            );
        }
        println!(
            "\nRun {} to reinstall.",
            format!("hookshelf update {}", stale[0].id).bold()
        );
        Ok(())
    }
}
