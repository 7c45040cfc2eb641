//! Job command handlers
//!
//! Handles checking, watching and submitting backend jobs.

use anyhow::{Context, Result};
use aqeed_client::JobId;
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;

use super::{client_and_poller, watch_job};
use crate::config::Config;
use crate::output::print_job_details;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Check a job's status once
    Status {
        /// Job ID
        id: String,
    },
    /// Poll a job until it finishes and print its result
    Watch {
        /// Job ID
        id: String,
    },
    /// Queue a job of any type the backend worker understands
    Submit {
        /// Worker job type (e.g., qa_processing, audit_contracts)
        job_type: String,

        /// Job payload as JSON
        #[arg(short, long, default_value = "{}")]
        payload: String,

        /// Print the job ID and exit without waiting
        #[arg(long)]
        no_wait: bool,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    match command {
        JobCommands::Status { id } => {
            let job_id = JobId::new(id);
            let job = client
                .get_job(&job_id)
                .await
                .with_context(|| format!("Failed to get status of job {}", job_id))?;
            print_job_details(&job_id, &job);
            Ok(())
        }
        JobCommands::Watch { id } => watch_job(&poller, JobId::new(id), config).await,
        JobCommands::Submit {
            job_type,
            payload,
            no_wait,
        } => {
            let payload = parse_payload(&payload)?;
            let job_id = client
                .submit_job(&job_type, &payload)
                .await
                .with_context(|| format!("Failed to submit {} job", job_type))?;

            if no_wait {
                println!("{}", job_id);
                return Ok(());
            }

            eprintln!("{} {}", "✓ Queued".green(), job_type.bold());
            watch_job(&poller, job_id, config).await
        }
    }
}

/// Parse a job payload, which must be a JSON object
fn parse_payload(raw: &str) -> Result<JsonValue> {
    let payload: JsonValue = serde_json::from_str(raw).context("Payload is not valid JSON")?;
    if !payload.is_object() {
        anyhow::bail!("Payload must be a JSON object");
    }
    Ok(payload)
}
