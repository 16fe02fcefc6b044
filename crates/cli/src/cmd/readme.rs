//! Readme command implementation

use clap::Args;

use hookshelf_engine::Error as EngineError;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Print a hook's README
#[derive(Debug, Clone, Args)]
pub struct ReadmeCommand {
    /// Hook id
    pub id: String,
}

impl Command for ReadmeCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let registry = context.load_registry()?;
        let entry = registry.find(&self.id).ok_or_else(|| EngineError::UnknownHook {
            id: self.id.clone(),
        })?;

        let readme = context.remote.readme(entry)?;
        print!("{readme}");
        if !readme.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
