//! List command implementation
//!
//! Without flags, list what the registry offers. With `--installed`, list
//! what the local inventory holds; no network access is needed then.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;

use hookshelf_engine::{RealSystem, System, header, inventory};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// List registry or installed hooks
#[derive(Debug, Clone, Args)]
pub struct ListCommand {
    /// List installed hooks instead of registry hooks
    #[arg(short, long)]
    pub installed: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InstalledRow {
    id: String,
    path: String,
    version: Option<String>,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        if self.installed {
            self.list_installed(context)
        } else {
            self.list_registry(context)
        }
    }
}

impl ListCommand {
    fn list_registry(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&registry.hooks)?);
            return Ok(());
        }

        if registry.hooks.is_empty() {
            println!("Registry {} has no hooks.", registry.name.bold());
            return Ok(());
        }

        println!(
            "{} {} ({} hooks)",
            registry.name.bold(),
            registry.version.dimmed(),
            registry.hooks.len()
        );
        let width = registry.hooks.iter().map(|h| h.id.len()).max().unwrap_or(0);
        for hook in &registry.hooks {
            println!(
                "  {:<width$}  {}",
                hook.id.cyan(),
                hook.description.as_deref().unwrap_or_default().dimmed(),
            );
        }
        Ok(())
    }

    fn list_installed(&self, context: &RuntimeContext) -> Result<()> {
        let root = context.install_root()?;
        let items = inventory::list(&root)?;

        let rows: Vec<InstalledRow> = items
            .iter()
            .map(|item| InstalledRow {
                id: item.id.clone(),
                path: item.path.to_string(),
                version: RealSystem
                    .read_to_string(&item.path)
                    .ok()
                    .and_then(|content| header::decode(&content))
                    .map(|info| info.version),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if rows.is_empty() {
            println!("No hooks installed in {}.", root.to_string().dimmed());
            return Ok(());
        }

        let width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0);
        for row in &rows {
            let version = row.version.as_deref().unwrap_or("no header");
            println!("  {:<width$}  {}", row.id.cyan(), version.dimmed());
        }
        Ok(())
    }
}
