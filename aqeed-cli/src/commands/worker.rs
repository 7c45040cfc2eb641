//! Worker command handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::Config;
use crate::output::print_worker_status;

/// Worker subcommands
#[derive(Subcommand)]
pub enum WorkerCommands {
    /// Show whether the backend job worker is running
    Status,
}

/// Handle worker commands
pub async fn handle_worker_command(command: WorkerCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        WorkerCommands::Status => {
            let status = client
                .worker_status()
                .await
                .context("Failed to get worker status")?;
            print_worker_status(&status);

            if !status.is_healthy() {
                anyhow::bail!("backend worker is not healthy");
            }
            Ok(())
        }
    }
}
