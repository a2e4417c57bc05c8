//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod run;

pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch a diagnostic across targets and poll it to completion
    Run(RunArgs),
}

/// Handle a CLI command
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run(args).await,
    }
}
