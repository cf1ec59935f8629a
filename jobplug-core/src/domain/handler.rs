//! Job handler contract
//!
//! A handler is the code a plugin author attaches to a job. It receives the
//! arguments forwarded by the host and either completes or returns a
//! [`JobError`].

use thiserror::Error;

/// Reserved error text that asks the host to stop the pipeline without
/// treating the job as failed.
///
/// Matching is exact and case-sensitive. [`JobError::ExitPipeline`] renders as
/// this text, and so does any other error whose message equals it.
pub const EXIT_PIPELINE_MESSAGE: &str = "pipeline exit requested by job";

/// Error returned by a job handler
#[derive(Debug, Error)]
pub enum JobError {
    /// Cooperative early termination of the pipeline
    #[error("pipeline exit requested by job")]
    ExitPipeline,

    /// Abnormal termination with a human-readable reason
    #[error("{0}")]
    Failed(String),
}

impl JobError {
    /// Creates a failure from anything displayable
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }
}

impl From<anyhow::Error> for JobError {
    fn from(err: anyhow::Error) -> Self {
        Self::Failed(format!("{:#}", err))
    }
}

impl From<std::io::Error> for JobError {
    fn from(err: std::io::Error) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Trait implemented by job handlers.
///
/// Handlers run on a blocking thread and may take as long as they need. They
/// can be invoked concurrently, so any state they share must be synchronized
/// by the handler itself.
///
/// Plain functions and closures with the matching signature implement this
/// trait automatically:
///
/// ```rust
/// use jobplug_core::{JobDefinition, JobError};
///
/// let job = JobDefinition::new("Build", |args: &[String]| {
///     if args.is_empty() {
///         return Err(JobError::failed("no target given"));
///     }
///     Ok(())
/// });
/// assert_eq!(job.title, "Build");
/// ```
pub trait JobHandler: Send + Sync + 'static {
    /// Runs the job with the arguments supplied by the host
    fn run(&self, args: &[String]) -> Result<(), JobError>;
}

impl<F> JobHandler for F
where
    F: Fn(&[String]) -> Result<(), JobError> + Send + Sync + 'static,
{
    fn run(&self, args: &[String]) -> Result<(), JobError> {
        self(args)
    }
}
