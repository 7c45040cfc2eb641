//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod analysis;
mod job;
mod vendor;
mod worker;

pub use job::JobCommands;
pub use vendor::VendorCommands;
pub use worker::WorkerCommands;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use aqeed_client::poller::PollOutcome;
use aqeed_client::{JobId, JobPoller, JobStatus, PollOptions, SubmitMode, SubmitOutcome};
use clap::{Args, Subcommand};
use colored::*;
use tracing::info;

use crate::config::Config;
use crate::output::{print_result, print_status_change};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect, watch and submit backend jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Ask a question about a workspace's documents
    Ask(analysis::AskArgs),
    /// Score a workspace's contracts against a criterion
    Score(analysis::ScoreArgs),
    /// Audit a workspace's contracts
    Audit(analysis::WorkspaceArgs),
    /// Recommend legal clause changes for a workspace's contracts
    Legal(analysis::WorkspaceArgs),
    /// Score a workspace's resumes against its job description
    Resumes(analysis::WorkspaceArgs),
    /// Vendor research
    Vendor {
        #[command(subcommand)]
        command: VendorCommands,
    },
    /// Backend worker health
    Worker {
        #[command(subcommand)]
        command: WorkerCommands,
    },
}

/// Options shared by every command that submits work
#[derive(Args, Debug, Clone, Copy)]
pub struct SubmitArgs {
    /// Ask the backend to run the work inline instead of queueing a job
    #[arg(long)]
    pub sync: bool,
}

impl SubmitArgs {
    pub fn mode(self) -> SubmitMode {
        if self.sync {
            SubmitMode::Sync
        } else {
            SubmitMode::Async
        }
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Ask(args) => analysis::ask(args, config).await,
        Commands::Score(args) => analysis::score(args, config).await,
        Commands::Audit(args) => analysis::audit(args, config).await,
        Commands::Legal(args) => analysis::legal(args, config).await,
        Commands::Resumes(args) => analysis::score_resumes(args, config).await,
        Commands::Vendor { command } => vendor::handle_vendor_command(command, config).await,
        Commands::Worker { command } => worker::handle_worker_command(command, config).await,
    }
}

/// Print a submission's result, polling its job first if it was queued
///
/// Both shapes go through [`JobPoller::resolve`]. Ctrl-C stops watching; a
/// queued job keeps running on the backend.
pub async fn finish_submission(
    poller: &JobPoller,
    submitted: SubmitOutcome,
    config: &Config,
) -> Result<()> {
    let job_id = submitted.job_id().cloned();
    let mut options = config.poll_options();

    if let Some(job_id) = &job_id {
        eprintln!("{} {}", "Waiting for job".bold(), job_id.to_string().cyan());
        options = with_progress(options, job_id.clone());
    }

    // Dropping the resolve future on Ctrl-C drops its session, which cancels it
    let outcome = tokio::select! {
        outcome = poller.resolve(submitted, options) => outcome,
        _ = tokio::signal::ctrl_c() => None,
    };

    report_outcome(job_id.as_ref(), outcome)
}

/// Poll a job until it finishes, printing status changes along the way
pub async fn watch_job(poller: &JobPoller, job_id: JobId, config: &Config) -> Result<()> {
    finish_submission(poller, SubmitOutcome::Async { job_id }, config).await
}

/// Print each status change once
fn with_progress(options: PollOptions, job_id: JobId) -> PollOptions {
    let last_status: Mutex<Option<JobStatus>> = Mutex::new(None);
    options.on_status_change(move |job| {
        let mut last = last_status.lock().unwrap_or_else(|e| e.into_inner());
        if *last != Some(job.status) {
            *last = Some(job.status);
            print_status_change(&job_id, job.status);
        }
    })
}

fn report_outcome(job_id: Option<&JobId>, outcome: Option<PollOutcome>) -> Result<()> {
    match (outcome, job_id) {
        (Some(result), Some(job_id)) => {
            let result = result.with_context(|| format!("Job {} did not complete", job_id))?;
            info!(job_id = %job_id, "Job finished");
            print_result(&result);
            Ok(())
        }
        (Some(result), None) => {
            print_result(&result?);
            Ok(())
        }
        (None, Some(job_id)) => {
            eprintln!(
                "{}",
                format!("Stopped watching job {}; it may still finish on the backend.", job_id)
                    .yellow()
            );
            anyhow::bail!("interrupted")
        }
        (None, None) => anyhow::bail!("interrupted"),
    }
}

/// Shared handle for command handlers
pub fn client_and_poller(config: &Config) -> (Arc<aqeed_client::BackendClient>, JobPoller) {
    let client = config.client();
    let poller = JobPoller::new(client.clone());
    (client, poller)
}
