//! Generated gRPC bindings and conversions from domain types

#![allow(clippy::all)]

tonic::include_proto!("proto");

impl From<&jobplug_core::Job> for Job {
    fn from(job: &jobplug_core::Job) -> Self {
        Job {
            unique_id: job.unique_id,
            title: job.title.clone(),
            description: job.description.clone(),
            depends_on: job.dependencies.clone(),
        }
    }
}

impl From<jobplug_core::JobResult> for JobResult {
    fn from(result: jobplug_core::JobResult) -> Self {
        JobResult {
            unique_id: result.unique_id,
            failed: result.failed,
            exit_pipeline: result.exit_pipeline,
            message: result.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::JobDispatcher;
    use tonic::server::NamedService;

    #[test]
    fn test_service_path_matches_host() {
        assert_eq!(
            <plugin_server::PluginServer<JobDispatcher> as NamedService>::NAME,
            "proto.Plugin"
        );
    }
}
