//! Commands module
//!
//! Defines the demo plugin's commands and their handlers.

mod list;
mod serve;

pub use serve::ServeArgs;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the plugin runtime (default when no command is given)
    Serve(ServeArgs),
    /// Print the job registry without starting a server
    List {
        /// Print as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Serve(args)) => serve::serve(args).await,
        Some(Commands::List { json }) => list::list_jobs(json),
        None => serve::serve_from_env().await,
    }
}
