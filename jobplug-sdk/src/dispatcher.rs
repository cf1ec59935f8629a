//! Execution dispatcher
//!
//! Serves the two plugin operations against a shared registry:
//! - Listing every job in declaration order
//! - Executing one job by identifier and reporting how it terminated
//!
//! Handlers are blocking code, so each run is moved to tokio's blocking pool.
//! Without a configured limit any number of handlers may run at once.

use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_stream::Stream;
use tonic::{Request, Response, Status};
use tracing::{debug, error, info, warn};

use jobplug_core::{JobOutcome, JobRegistry, JobResult};

use crate::error::DispatchError;
use crate::proto::{self, plugin_server::Plugin};

/// Stream of job records sent to the host
pub type JobStream = Pin<Box<dyn Stream<Item = Result<proto::Job, Status>> + Send>>;

/// Dispatcher bound to an immutable job registry
#[derive(Clone)]
pub struct JobDispatcher {
    registry: Arc<JobRegistry>,
    guard: Option<Arc<Semaphore>>,
}

impl JobDispatcher {
    /// Creates a dispatcher with no execution limit
    pub fn new(registry: Arc<JobRegistry>) -> Self {
        Self {
            registry,
            guard: None,
        }
    }

    /// Caps the number of handlers running at the same time
    ///
    /// Calls beyond the cap wait for a free slot instead of failing.
    pub fn with_max_parallel_jobs(mut self, limit: usize) -> Self {
        self.guard = Some(Arc::new(Semaphore::new(limit)));
        self
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Returns a lazy stream over every registered job
    ///
    /// Each call starts a fresh pass over the registry.
    pub fn job_stream(&self) -> JobStream {
        let registry = Arc::clone(&self.registry);
        let count = registry.len();
        let jobs = (0..count).filter_map(move |position| {
            registry
                .list_all()
                .get(position)
                .map(|job| Ok::<_, Status>(proto::Job::from(job)))
        });
        Box::pin(tokio_stream::iter(jobs))
    }

    /// Executes a job and converts its termination into a [`JobResult`]
    ///
    /// # Errors
    /// Returns [`DispatchError::JobNotFound`] if no job carries `unique_id`.
    /// Handler failures are never errors here; they are encoded in the result.
    pub async fn execute(
        &self,
        unique_id: u32,
        args: Vec<String>,
    ) -> Result<JobResult, DispatchError> {
        let job = self
            .registry
            .find_by_id(unique_id)
            .ok_or(DispatchError::JobNotFound(unique_id))?
            .clone();

        // The permit travels with the blocking task so a cancelled call
        // keeps its slot until the handler actually returns.
        let permit = match &self.guard {
            Some(guard) => Arc::clone(guard).acquire_owned().await.ok(),
            None => None,
        };

        let title = job.title.clone();
        info!(
            "Executing job '{}' ({}) with {} argument(s)",
            title,
            unique_id,
            args.len()
        );

        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job.run(&args)
        });

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => {
                let reason = panic_message(e.into_panic());
                error!("Job '{}' panicked: {}", title, reason);
                JobOutcome::Failed(format!("job handler panicked: {}", reason))
            }
            Err(e) => {
                error!("Job '{}' did not finish: {}", title, e);
                JobOutcome::Failed(format!("job handler did not finish: {}", e))
            }
        };

        match &outcome {
            JobOutcome::Completed => info!("Job '{}' completed", title),
            JobOutcome::ExitPipeline(_) => info!("Job '{}' requested pipeline exit", title),
            JobOutcome::Failed(message) => warn!("Job '{}' failed: {}", title, message),
        }

        Ok(JobResult::from_outcome(unique_id, outcome))
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[tonic::async_trait]
impl Plugin for JobDispatcher {
    type ListJobsStream = JobStream;

    async fn list_jobs(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<Self::ListJobsStream>, Status> {
        debug!("Streaming {} job(s) to host", self.registry.len());
        Ok(Response::new(self.job_stream()))
    }

    async fn execute_job(
        &self,
        request: Request<proto::JobRequest>,
    ) -> Result<Response<proto::JobResult>, Status> {
        let proto::JobRequest { unique_id, args } = request.into_inner();

        let result = self.execute(unique_id, args).await.map_err(|e| {
            warn!("Rejected execution request: {}", e);
            Status::from(e)
        })?;

        Ok(Response::new(result.into()))
    }
}
