//! HWProbe CLI
//!
//! Command-line driver for vendor diagnostics across hardware controllers:
//! submits a diagnostic to every requested target, polls the targets to
//! completion with timeout enforcement, and renders the final per-target
//! states.

mod commands;
mod config;
mod report;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};

#[derive(Parser)]
#[command(name = "hwprobe")]
#[command(about = "Hardware diagnostics orchestration CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwprobe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    handle_command(cli.command).await
}
