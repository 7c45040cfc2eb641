//! Terminal output helpers

use aqeed_client::{Job, JobId, JobStatus};
use aqeed_core::dto::job::WorkerStatus;
use colored::*;
use serde_json::Value;

/// Print an opaque job result as pretty JSON
pub fn print_result(result: &Value) {
    match serde_json::to_string_pretty(result) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{}", result),
    }
}

/// Print one status check
pub fn print_job_details(job_id: &JobId, job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:      {}", job_id.to_string().cyan());
    println!("  Status:  {}", colorize_status(job.status));

    if let Some(job_type) = &job.job_type {
        println!("  Type:    {}", job_type);
    }

    if let Some(workspace) = job
        .payload
        .as_ref()
        .and_then(|payload| payload.get("workspace_name"))
        .and_then(Value::as_str)
    {
        println!("  Workspace: {}", workspace.dimmed());
    }

    if let Some(error) = job.error_message() {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }

    if let Some(result) = &job.result {
        println!("\n{}", "Result:".bold());
        print_result(result);
    }
}

/// Print a progress line when a watched job changes status
pub fn print_status_change(job_id: &JobId, status: JobStatus) {
    eprintln!(
        "  {} Job {} is {}",
        "▸".cyan(),
        job_id.to_string().dimmed(),
        colorize_status(status)
    );
}

pub fn print_worker_status(status: &WorkerStatus) {
    let health = if status.is_healthy() {
        status.status.green()
    } else {
        status.status.red()
    };

    println!("{}", "Worker Status:".bold());
    println!("  Status:          {}", health);
    println!(
        "  Redis:           {}",
        if status.redis_connected {
            "connected".green()
        } else {
            "disconnected".red()
        }
    );
    println!(
        "  Worker thread:   {}",
        if status.worker_thread_alive {
            "alive".green()
        } else {
            "stopped".red()
        }
    );
    if let Some(count) = status.jobs_in_queue {
        println!("  Jobs in queue:   {}", count);
    }
    if let Some(error) = &status.error {
        println!("  Error:           {}", error.red());
    }
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Started | JobStatus::Processing => status_str.cyan(),
        JobStatus::Success => status_str.green(),
        JobStatus::Failure => status_str.red(),
        JobStatus::NotFound => status_str.red(),
        JobStatus::Unknown => status_str.dimmed(),
    }
}
