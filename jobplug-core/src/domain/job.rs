//! Job domain types

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::handler::{EXIT_PIPELINE_MESSAGE, JobError, JobHandler};

/// Job as declared by the plugin author, before registry resolution
///
/// Dependencies are referenced by title and matched case-insensitively when
/// the registry is built.
#[derive(Clone)]
pub struct JobDefinition {
    pub title: String,
    pub description: String,
    pub depends_on: Vec<String>,
    pub handler: Arc<dyn JobHandler>,
}

impl JobDefinition {
    /// Creates a job definition with no description and no dependencies
    pub fn new(title: impl Into<String>, handler: impl JobHandler) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            depends_on: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Sets the informational description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares dependencies by title
    pub fn depends_on<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(titles.into_iter().map(Into::into));
        self
    }
}

impl fmt::Debug for JobDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobDefinition")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// Resolved job held by the registry
///
/// Structure shared between the registry (builds) and the dispatcher
/// (lists and executes).
#[derive(Clone, Serialize)]
pub struct Job {
    pub unique_id: u32,
    pub title: String,
    pub description: String,
    /// Identifiers of the jobs this one depends on, in declaration order
    pub dependencies: Vec<u32>,
    #[serde(skip_serializing)]
    pub handler: Arc<dyn JobHandler>,
}

impl Job {
    /// Runs the handler and classifies how it terminated
    pub fn run(&self, args: &[String]) -> JobOutcome {
        JobOutcome::from_handler(self.handler.run(args))
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("unique_id", &self.unique_id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// How a single handler run terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Handler returned normally
    Completed,
    /// Handler asked for the pipeline to stop; not a failure
    ExitPipeline(String),
    /// Handler terminated abnormally
    Failed(String),
}

impl JobOutcome {
    /// Classifies a handler's return value
    ///
    /// The decision is made on the rendered error text so that handlers which
    /// build the reserved message themselves behave like
    /// [`JobError::ExitPipeline`].
    pub fn from_handler(result: Result<(), JobError>) -> Self {
        match result {
            Ok(()) => JobOutcome::Completed,
            Err(err) => {
                let message = err.to_string();
                if message == EXIT_PIPELINE_MESSAGE {
                    JobOutcome::ExitPipeline(message)
                } else {
                    JobOutcome::Failed(message)
                }
            }
        }
    }
}

/// Result of a job execution, as reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResult {
    pub unique_id: u32,
    pub failed: bool,
    pub exit_pipeline: bool,
    pub message: String,
}

impl JobResult {
    /// Converts an outcome into the result reported for job `unique_id`
    pub fn from_outcome(unique_id: u32, outcome: JobOutcome) -> Self {
        match outcome {
            JobOutcome::Completed => JobResult {
                unique_id,
                failed: false,
                exit_pipeline: false,
                message: String::new(),
            },
            JobOutcome::ExitPipeline(message) => JobResult {
                unique_id,
                failed: false,
                exit_pipeline: true,
                message,
            },
            JobOutcome::Failed(message) => JobResult {
                unique_id,
                failed: true,
                exit_pipeline: true,
                message,
            },
        }
    }
}
