//! Info command implementation
//!
//! Display registry metadata for a hook alongside its local install state.

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::{Error as EngineError, RealSystem, System, header, inventory};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Show metadata for a hook
#[derive(Debug, Clone, Args)]
pub struct InfoCommand {
    /// Hook id (e.g. use-debounce)
    pub id: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Command for InfoCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;
        let entry = registry.find(&self.id).ok_or_else(|| EngineError::UnknownHook {
            id: self.id.clone(),
        })?;
        let meta = context.remote.metadata(entry)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&meta)?);
            return Ok(());
        }

        println!("{} {}", meta.name.bold(), meta.version.green());
        if !meta.description.is_empty() {
            println!("{}", meta.description);
        }
        println!();

        if !meta.tags.is_empty() {
            println!("  {:<10} {}", "Tags:".dimmed(), meta.tags.join(", "));
        }

        println!("  {:<10}", "Files:".dimmed());
        for file in &meta.files {
            println!("    {} -> {}", file.src, file.dest.cyan());
        }

        if !meta.peer_dependencies.is_empty() {
            println!("  {:<10}", "Peers:".dimmed());
            for (name, range) in &meta.peer_dependencies {
                println!("    {name} {}", range.dimmed());
            }
        }

        let root = context.install_root()?;
        let installed = inventory::list(&root)?
            .into_iter()
            .find(|item| item.id == entry.id)
            .and_then(|item| RealSystem.read_to_string(&item.path).ok())
            .and_then(|content| header::decode(&content));

        match installed {
            Some(local) if local.version == meta.version => {
                println!("\n  {:<10} {}", "Installed:".dimmed(), local.version.green());
            }
            Some(local) => println!(
                "\n  {:<10} {} ({} available)",
                "Installed:".dimmed(),
                local.version.yellow(),
                meta.version
            ),
            None => println!("\n  {:<10} no", "Installed:".dimmed()),
        }

        Ok(())
    }
}
