//! Doctor command implementation
//!
//! Check installed hooks against their headers and the registry. Exits
//! non-zero when any issue is found.

use clap::Args;
use owo_colors::OwoColorize;

use hookshelf_engine::{doctor, inventory};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};
use crate::ui::StatusIcon;

/// Check installed hooks for problems
#[derive(Debug, Clone, Args)]
pub struct DoctorCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Command for DoctorCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;
        let root = context.install_root()?;
        let items = inventory::list(&root)?;
        let report = doctor(&registry, &items);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if report.is_healthy() {
            println!("{} {}", StatusIcon::Success.get().green(), report.summary());
        } else {
            for issue in &report.issues {
                let shown = issue
                    .path
                    .as_path()
                    .strip_prefix(context.project.root())
                    .unwrap_or(issue.path.as_path());
                println!(
                    "{} {} {} ({})",
                    StatusIcon::Error.get().red(),
                    issue.id.bold(),
                    issue.kind,
                    shown.display().dimmed()
                );
            }
            println!("\n{} {}", StatusIcon::Warning.get().yellow(), report.summary());
        }

        if report.is_healthy() {
            Ok(())
        } else {
            Err(CommandError::Unhealthy {
                issues: report.issues.len(),
                checked: report.items_checked,
            })
        }
    }
}
