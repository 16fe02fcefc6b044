//! Init command implementation
//!
//! Write `hookshelf.json` into the working directory, prompting for the
//! common settings unless `--yes` is given.

use clap::Args;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use hookshelf_config::{CONFIG_FILE_NAME, Project, ProjectConfig};

use crate::error::{CommandError, Result};
use crate::ui::StatusIcon;

/// Create a project configuration
#[derive(Debug, Clone, Args)]
pub struct InitCommand {
    /// Accept defaults and overwrite without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Install root, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Do not maintain a re-export index file
    #[arg(long)]
    pub no_index: bool,

    /// Strip the "use client" directive from installed files
    #[arg(long)]
    pub strip_use_client: bool,

    /// Import alias prefix to rewrite (e.g. "@/")
    #[arg(long, value_name = "PREFIX", requires = "alias_target")]
    pub alias_prefix: Option<String>,

    /// Directory the alias prefix points at (e.g. "src")
    #[arg(long, value_name = "DIR", requires = "alias_prefix")]
    pub alias_target: Option<PathBuf>,
}

impl InitCommand {
    /// Run init in `cwd`
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails or the file cannot be written
    pub fn run(&self, cwd: &Path) -> Result<()> {
        let path = cwd.join(CONFIG_FILE_NAME);
        let existing = path.is_file();

        // Start from the current file so re-running init only changes what is asked
        let base = if existing {
            ProjectConfig::load(&path)?
        } else {
            ProjectConfig::default()
        };

        if existing && !self.yes {
            let overwrite = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{CONFIG_FILE_NAME} already exists. Overwrite?"))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("Cancelled.");
                return Ok(());
            }
        }

        let mut config = self.apply_flags(base);
        if !self.yes {
            config = prompt(config)?;
        }

        let mut project = Project::new(cwd, config);
        project.save()?;

        println!(
            "{} Wrote {}",
            StatusIcon::Success.get().green(),
            path.display().bright_white()
        );
        println!(
            "  Hooks will be installed into {}",
            project.config().base_dir.display().cyan()
        );
        Ok(())
    }

    /// Overlay command-line flags on a configuration
    fn apply_flags(&self, mut config: ProjectConfig) -> ProjectConfig {
        if let Some(dir) = &self.base_dir {
            config.base_dir.clone_from(dir);
        }
        if self.no_index {
            config.add_index = false;
        }
        if self.strip_use_client {
            config.strip_use_client = true;
        }
        if let (Some(prefix), Some(target)) = (&self.alias_prefix, &self.alias_target) {
            config.alias_prefix = Some(prefix.clone());
            config.alias_target = Some(target.clone());
        }
        config
    }
}

fn prompt(mut config: ProjectConfig) -> Result<ProjectConfig> {
    let theme = ColorfulTheme::default();

    let base_dir: String = Input::with_theme(&theme)
        .with_prompt("Where should hooks be installed?")
        .default(config.base_dir.display().to_string())
        .interact_text()?;
    if base_dir.trim().is_empty() {
        return Err(CommandError::config(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "baseDir cannot be empty",
        )));
    }
    config.base_dir = PathBuf::from(base_dir.trim());

    config.add_index = Confirm::with_theme(&theme)
        .with_prompt("Maintain an index file re-exporting installed hooks?")
        .default(config.add_index)
        .interact()?;

    config.strip_use_client = Confirm::with_theme(&theme)
        .with_prompt("Strip the \"use client\" directive from installed files?")
        .default(config.strip_use_client)
        .interact()?;

    Ok(config)
}
