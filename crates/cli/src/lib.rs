//! Hookshelf CLI library
//!
//! This library contains all the CLI logic for hookshelf, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;
use hookshelf_config::Project;
use hookshelf_registry::Remote;

/// Hookshelf - copy reusable hooks from a registry into your project
#[derive(Parser)]
#[command(name = "hookshelf")]
#[command(about = "Install hooks from a registry into your project")]
#[command(version)]
#[command(long_about = "Install hooks from a registry into your project

Hooks are copied as source files, not installed as packages. Every installed
file carries a version header so that hookshelf can later tell what is
installed, what is outdated and what has drifted.

Features:
  • Alias imports rewritten to relative paths
  • Re-export index kept in sync
  • Presets, search, outdated and doctor checks")]
pub struct Cli {
    /// Registry location (URL or local directory)
    #[arg(long, env = "HOOKSHELF_REGISTRY", value_name = "URL_OR_DIR")]
    pub registry: Option<String>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "HOOKSHELF_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for hookshelf CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create hookshelf.json in the current directory
    Init(cmd::init::InitCommand),

    /// List hooks available in the registry, or installed locally
    List(cmd::list::ListCommand),

    /// Show metadata for a hook
    Info(cmd::info::InfoCommand),

    /// Install one or more hooks
    #[command(long_about = "Install one or more hooks

Each hook's files are fetched from the registry, alias imports are rewritten
relative to their new location, and a version header is written on the first
line. An existing file is backed up to <file>.bak before it is replaced,
unless --force is given.

Examples:
  • hookshelf add use-debounce
      → Install into the configured baseDir (default src/hooks)

  • hookshelf add use-toggle use-media --strip-use-client
      → Install two hooks without the \"use client\" directive

  • hookshelf add use-debounce --dry-run
      → Show what would be written")]
    Add(cmd::add::AddCommand),

    /// Reinstall hooks from the registry, keeping backups
    Update(cmd::update::UpdateCommand),

    /// Remove installed hooks and their index entries
    Remove(cmd::remove::RemoveCommand),

    /// Print a hook's README
    Readme(cmd::readme::ReadmeCommand),

    /// List presets or install one
    Preset(cmd::preset::PresetCommand),

    /// Search the registry by id, name, description or tag
    Search(cmd::search::SearchCommand),

    /// Show installed hooks with a newer registry version
    Outdated(cmd::outdated::OutdatedCommand),

    /// Check installed hooks against the registry
    Doctor(cmd::doctor::DoctorCommand),

    /// Move installed hooks to a new base directory
    Migrate(cmd::migrate::MigrateCommand),
}

/// Execute the command based on the command type
fn execute_command(command: Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Init(_) => {
            unreachable!("Init command already handled above")
        }
        Commands::List(list_cmd) => {
            list_cmd.execute(context)?;
        }
        Commands::Info(info_cmd) => {
            info_cmd.execute(context)?;
        }
        Commands::Add(add_cmd) => {
            add_cmd.execute(context)?;
        }
        Commands::Update(update_cmd) => {
            update_cmd.execute(context)?;
        }
        Commands::Remove(remove_cmd) => {
            remove_cmd.execute(context)?;
        }
        Commands::Readme(readme_cmd) => {
            readme_cmd.execute(context)?;
        }
        Commands::Preset(preset_cmd) => {
            preset_cmd.execute(context)?;
        }
        Commands::Search(search_cmd) => {
            search_cmd.execute(context)?;
        }
        Commands::Outdated(outdated_cmd) => {
            outdated_cmd.execute(context)?;
        }
        Commands::Doctor(doctor_cmd) => {
            doctor_cmd.execute(context)?;
        }
        Commands::Migrate(migrate_cmd) => {
            migrate_cmd.execute(context)?;
        }
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - The working directory or project configuration cannot be read
/// - The registry client cannot be created
/// - Command execution fails
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging based on verbosity
    hookshelf_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    // Init writes the configuration, so it runs against the working directory
    // and never needs the registry
    if let Commands::Init(init_cmd) = &cli.command {
        return Ok(init_cmd.run(&cwd)?);
    }

    let project = Project::discover(&cwd).context("Failed to load project configuration")?;
    let location = common::resolve_registry_location(cli.registry.as_deref(), &project);
    tracing::debug!(root = %project.root().display(), registry = %location, "Resolved project");

    let remote = Remote::open(&location)
        .with_context(|| format!("Failed to open registry at {location}"))?;
    let context = RuntimeContext::new(project, remote);

    execute_command(cli.command, &context)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_flags() {
        let cli = Cli::try_parse_from([
            "hookshelf",
            "--registry",
            "./registry",
            "add",
            "use-debounce",
            "use-toggle",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.registry.as_deref(), Some("./registry"));
        match cli.command {
            Commands::Add(add) => {
                assert_eq!(add.ids, vec!["use-debounce", "use-toggle"]);
                assert!(add.dry_run);
                assert!(!add.force);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_add_help_mentions_backups() {
        let cmd = Cli::command();
        let add = cmd.find_subcommand("add").unwrap();
        let help = add.get_long_about().unwrap().to_string();
        assert!(help.contains("<file>.bak"));
        assert!(help.contains("--force"));
    }

    #[test]
    fn test_add_requires_an_id() {
        assert!(Cli::try_parse_from(["hookshelf", "add"]).is_err());
    }

    #[test]
    fn test_preset_name_is_optional() {
        let cli = Cli::try_parse_from(["hookshelf", "preset"]).unwrap();
        assert!(matches!(cli.command, Commands::Preset(ref p) if p.name.is_none()));
    }
}
