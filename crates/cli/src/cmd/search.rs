//! Search command implementation

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::search;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::create_spinner;

/// Search the registry
#[derive(Debug, Clone, Args)]
pub struct SearchCommand {
    /// Case-insensitive text matched against id, name, description and tags
    pub query: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Command for SearchCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;

        let spinner = create_spinner("Searching...");
        let hits = search(&context.remote, &registry, &self.query);
        spinner.finish_and_clear();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&hits)?);
            return Ok(());
        }

        if hits.is_empty() {
            println!("No hooks match \"{}\".", self.query);
            return Ok(());
        }

        for hit in &hits {
            let version = hit.version.as_deref().unwrap_or_default();
            println!("{} {}", hit.id.cyan().bold(), version.dimmed());
            if let Some(description) = &hit.description {
                println!("    {description}");
            }
            if !hit.tags.is_empty() {
                println!("    {}", hit.tags.join(", ").dimmed());
            }
        }
        Ok(())
    }
}
