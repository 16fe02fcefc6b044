//! Command trait for hookshelf CLI
//!
//! Every subcommand that runs against a project implements [`Command`]. The
//! `execute` method receives a [`RuntimeContext`] holding the discovered
//! project and the registry remote.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all hookshelf commands
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct MyCommand {
///     #[arg(long)]
///     pub json: bool,
/// }
///
/// impl Command for MyCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         let registry = context.load_registry()?;
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
