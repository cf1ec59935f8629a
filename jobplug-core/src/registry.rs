//! Job registry
//!
//! Validates the job list declared by a plugin and freezes it into a
//! read-only table. The registry is built once at startup and shared by
//! reference afterwards, so lookups need no locking.

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::job::{Job, JobDefinition};
use crate::hash;

/// Errors that make a job list unusable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two jobs share the exact same title
    #[error("duplicate job found (two jobs with the same title): {title}")]
    DuplicateJob { title: String },

    /// A dependency names a title no job carries
    #[error("job {job} has dependency {dependency} which is not declared")]
    DependencyNotDeclared { job: String, dependency: String },
}

/// Immutable, validated table of jobs
#[derive(Debug)]
pub struct JobRegistry {
    jobs: Vec<Job>,
    index: HashMap<u32, usize>,
}

impl JobRegistry {
    /// Builds a registry from the declared job list
    ///
    /// Jobs are processed in declaration order. For each job the identifier
    /// is derived from its title, its dependencies are resolved one level
    /// deep (case-insensitive title match against the whole list), and then
    /// its title is checked for duplicates (case-sensitive).
    ///
    /// A dependency title that matches several jobs differing only by case
    /// resolves to all of them, in declaration order.
    ///
    /// # Errors
    /// Returns the first [`RegistryError`] encountered.
    pub fn build(definitions: Vec<JobDefinition>) -> Result<Self, RegistryError> {
        let declared: Vec<(String, u32)> = definitions
            .iter()
            .map(|def| (def.title.to_lowercase(), hash::job_id(&def.title)))
            .collect();

        let mut jobs = Vec::with_capacity(definitions.len());

        for (position, def) in definitions.iter().enumerate() {
            let unique_id = hash::job_id(&def.title);

            let mut dependencies = Vec::with_capacity(def.depends_on.len());
            for dependency in &def.depends_on {
                let wanted = dependency.to_lowercase();
                let before = dependencies.len();
                dependencies.extend(
                    declared
                        .iter()
                        .filter(|(title, _)| *title == wanted)
                        .map(|(_, id)| *id),
                );

                if dependencies.len() == before {
                    return Err(RegistryError::DependencyNotDeclared {
                        job: def.title.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }

            let duplicated = definitions
                .iter()
                .enumerate()
                .any(|(other, candidate)| other != position && candidate.title == def.title);
            if duplicated {
                return Err(RegistryError::DuplicateJob {
                    title: def.title.clone(),
                });
            }

            debug!(
                "Registered job '{}' (id: {}, dependencies: {:?})",
                def.title, unique_id, dependencies
            );

            jobs.push(Job {
                unique_id,
                title: def.title.clone(),
                description: def.description.clone(),
                dependencies,
                handler: def.handler.clone(),
            });
        }

        let mut index = HashMap::with_capacity(jobs.len());
        for (position, job) in jobs.iter().enumerate() {
            if let Some(&existing) = index.get(&job.unique_id) {
                let existing: &Job = &jobs[existing];
                warn!(
                    "Jobs '{}' and '{}' hash to the same id {}; lookups resolve to '{}'",
                    existing.title, job.title, job.unique_id, existing.title
                );
                continue;
            }
            index.insert(job.unique_id, position);
        }

        info!("Job registry built with {} job(s)", jobs.len());

        Ok(Self { jobs, index })
    }

    /// Returns all jobs in declaration order
    pub fn list_all(&self) -> &[Job] {
        &self.jobs
    }

    /// Gets a job by its unique identifier
    pub fn find_by_id(&self, unique_id: u32) -> Option<&Job> {
        self.index.get(&unique_id).map(|&position| &self.jobs[position])
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
