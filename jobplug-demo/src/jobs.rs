//! Jobs exposed by the demo plugin
//!
//! A small release pipeline: checkout → build → test → deploy.

use jobplug_sdk::{JobDefinition, JobError};
use std::time::Duration;
use tracing::info;

/// Returns the job list in declaration order
pub fn pipeline() -> Vec<JobDefinition> {
    vec![
        JobDefinition::new("Checkout", checkout).description("Fetch the sources"),
        JobDefinition::new("Build", build)
            .description("Compile the project")
            .depends_on(["checkout"]),
        JobDefinition::new("Test", run_tests)
            .description("Run the test suite; pass --fail to simulate a red build")
            .depends_on(["build"]),
        JobDefinition::new("Deploy", deploy)
            .description("Ship the artifact; pass --dry-run to stop the pipeline here")
            .depends_on(["Test"]),
    ]
}

fn checkout(args: &[String]) -> Result<(), JobError> {
    let revision = args.first().map(String::as_str).unwrap_or("HEAD");
    info!("Checking out revision {}", revision);
    Ok(())
}

fn build(_args: &[String]) -> Result<(), JobError> {
    info!("Compiling");
    std::thread::sleep(Duration::from_millis(200));
    Ok(())
}

fn run_tests(args: &[String]) -> Result<(), JobError> {
    if args.iter().any(|arg| arg == "--fail") {
        return Err(JobError::failed("2 of 48 tests failed"));
    }
    info!("All tests passed");
    Ok(())
}

fn deploy(args: &[String]) -> Result<(), JobError> {
    if args.iter().any(|arg| arg == "--dry-run") {
        info!("Dry run requested, stopping pipeline before deployment");
        return Err(JobError::ExitPipeline);
    }
    info!("Deployed");
    Ok(())
}
