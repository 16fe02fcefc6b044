//! Remove command implementation

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::Reconciler;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;

/// Remove installed hooks
#[derive(Debug, Clone, Args)]
pub struct RemoveCommand {
    /// Hook ids to remove
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<String>,
}

impl Command for RemoveCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;
        let reconciler = Reconciler::new(&context.project, &context.remote, &registry);
        let root = context.project.root();

        for id in &self.ids {
            let report = reconciler.remove(id)?;

            if report.removed.is_empty() {
                println!(
                    "{} {} was not installed",
                    StatusIcon::Warning.get().yellow(),
                    id.bold()
                );
            } else {
                println!("{} Removed {}", StatusIcon::Success.get().green(), id.bold());
            }

            for path in &report.removed {
                let shown = path.as_path().strip_prefix(root).unwrap_or(path.as_path());
                println!("    {} {}", "-".red(), shown.display());
            }
            for path in &report.index_updated {
                let shown = path.as_path().strip_prefix(root).unwrap_or(path.as_path());
                println!("    {} {}", "index".dimmed(), shown.display());
            }
        }
        Ok(())
    }
}
