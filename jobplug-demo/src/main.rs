//! Jobplug demo plugin
//!
//! Example plugin binary exposing a small release pipeline to a host.
//! Launched without arguments it reads its TLS material from the
//! environment, prints the handshake line and serves.

mod commands;
mod jobs;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};

#[derive(Parser)]
#[command(name = "jobplug-demo")]
#[command(about = "Demo pipeline plugin", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    jobplug_sdk::telemetry::init_tracing("jobplug_demo=info,jobplug_sdk=info,jobplug_core=info");

    let cli = Cli::parse();
    handle_command(cli.command).await
}
