//! List command handler
//!
//! Builds the registry exactly as `serve` would and prints it.

use anyhow::{Context, Result};
use colored::*;
use jobplug_sdk::{Job, JobRegistry};

use crate::jobs;

/// Print the registry as a colored summary or as JSON
pub fn list_jobs(json: bool) -> Result<()> {
    let registry = JobRegistry::build(jobs::pipeline()).context("Invalid job list")?;

    if json {
        let rendered = serde_json::to_string_pretty(registry.list_all())
            .context("Failed to serialize jobs")?;
        println!("{}", rendered);
        return Ok(());
    }

    if registry.is_empty() {
        println!("{}", "No jobs declared.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} job(s):", registry.len()).bold()
    );
    println!();
    for job in registry.list_all() {
        print_job_summary(job, &registry);
    }

    Ok(())
}

fn print_job_summary(job: &Job, registry: &JobRegistry) {
    println!("  {} {}", "▸".cyan(), job.title.bold());
    println!("    ID:           {}", job.unique_id.to_string().dimmed());
    if !job.description.is_empty() {
        println!("    Description:  {}", job.description);
    }
    if !job.dependencies.is_empty() {
        let names: Vec<&str> = job
            .dependencies
            .iter()
            .filter_map(|id| registry.find_by_id(*id))
            .map(|dep| dep.title.as_str())
            .collect();
        println!("    Depends on:   {}", names.join(", "));
    }
    println!();
}
