//! Jobplug SDK
//!
//! Runtime for plugin binaries that expose jobs to a pipeline host.
//!
//! Startup is strictly sequential and aborts on the first failure:
//! 1. Build and validate the job registry
//! 2. Load the mutual-TLS material named by the configuration
//! 3. Bind an ephemeral loopback port and register health + job services
//! 4. Print the handshake line on stdout
//! 5. Serve until the process is stopped
//!
//! ```no_run
//! use jobplug_sdk::{JobDefinition, JobError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jobplug_sdk::ServeError> {
//!     jobplug_sdk::telemetry::init_tracing("info");
//!
//!     jobplug_sdk::serve(vec![
//!         JobDefinition::new("Build", |_: &[String]| -> Result<(), JobError> { Ok(()) }),
//!     ])
//!     .await
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handshake;
pub mod proto;
pub mod server;
pub mod telemetry;

use std::sync::Arc;
use tracing::info;

pub use config::Config;
pub use dispatcher::JobDispatcher;
pub use error::{DispatchError, ServeError};
pub use handshake::Handshake;
pub use jobplug_core::{
    EXIT_PIPELINE_MESSAGE, Job, JobDefinition, JobError, JobHandler, JobOutcome, JobRegistry,
    JobResult, RegistryError,
};
pub use server::SecureServer;

/// Serves `jobs` using configuration read from the environment
pub async fn serve(jobs: Vec<JobDefinition>) -> error::Result<()> {
    let config = Config::from_env()?;
    serve_with_config(config, jobs).await
}

/// Serves `jobs` with an explicit configuration
///
/// Returns once the server stops after Ctrl-C, or with the first startup error.
pub async fn serve_with_config(config: Config, jobs: Vec<JobDefinition>) -> error::Result<()> {
    config.validate()?;

    let registry = Arc::new(JobRegistry::build(jobs)?);

    let mut dispatcher = JobDispatcher::new(registry);
    if let Some(limit) = config.max_parallel_jobs {
        info!("Limiting concurrent job executions to {}", limit);
        dispatcher = dispatcher.with_max_parallel_jobs(limit);
    }

    let server = SecureServer::bind(&config, dispatcher).await?;

    Handshake::new(server.local_addr())
        .emit(&mut std::io::stdout().lock())
        .map_err(ServeError::Handshake)?;

    server
        .serve_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
}
