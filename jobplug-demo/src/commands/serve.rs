//! Serve command handler

use anyhow::{Context, Result};
use clap::Args;
use jobplug_sdk::Config;
use std::path::PathBuf;

use crate::jobs;

/// TLS material and runtime limits for `serve`
#[derive(Args)]
pub struct ServeArgs {
    /// Server certificate (PEM)
    #[arg(long, env = "GAIA_PLUGIN_CERT")]
    cert: PathBuf,

    /// Server private key (PEM)
    #[arg(long, env = "GAIA_PLUGIN_KEY")]
    key: PathBuf,

    /// Root CA bundle that signs client certificates (PEM)
    #[arg(long, env = "GAIA_PLUGIN_CA_CERT")]
    ca_cert: PathBuf,

    /// Maximum number of jobs running at the same time
    #[arg(long, env = "GAIA_PLUGIN_MAX_PARALLEL_JOBS")]
    max_parallel_jobs: Option<usize>,
}

/// Serve with explicit arguments
pub async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = Config::new(args.cert, args.key, args.ca_cert);
    if let Some(limit) = args.max_parallel_jobs {
        config = config.with_max_parallel_jobs(limit);
    }

    jobplug_sdk::serve_with_config(config, jobs::pipeline())
        .await
        .context("Plugin runtime failed")
}

/// Serve with configuration from the environment, as the host launches it
pub async fn serve_from_env() -> Result<()> {
    jobplug_sdk::serve(jobs::pipeline())
        .await
        .context("Plugin runtime failed")
}
