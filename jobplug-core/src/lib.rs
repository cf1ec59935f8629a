//! Jobplug Core
//!
//! Core types and abstractions for plugin-side job runtimes.
//!
//! This crate contains:
//! - Domain types: jobs, handler contract, execution outcomes
//! - Registry: the validated, immutable job table built once at startup
//! - Identity: the title hash shared between host and plugin

pub mod domain;
pub mod hash;
pub mod registry;

pub use domain::handler::{EXIT_PIPELINE_MESSAGE, JobError, JobHandler};
pub use domain::job::{Job, JobDefinition, JobOutcome, JobResult};
pub use registry::{JobRegistry, RegistryError};
