//! Aqeed CLI
//!
//! Command-line interface for the Aqeed analysis backend. Submits contract,
//! resume and vendor analyses and waits for their jobs to finish.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset
///
/// Keeps the poller's terminal-outcome and retry logs visible.
const DEFAULT_LOG_FILTER: &str = "aqeed=info,aqeed_client=info";

#[derive(Parser)]
#[command(name = "aqeed")]
#[command(about = "Aqeed.ai contract, resume and vendor analysis CLI", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "AQEED_BACKEND_URL", default_value = "http://localhost:8000")]
    backend_url: String,

    /// Delay between job status checks, in milliseconds
    #[arg(long, env = "AQEED_POLL_INTERVAL_MS", default_value_t = 3000)]
    interval_ms: u64,

    /// Status checks before giving up on a job
    #[arg(long, env = "AQEED_MAX_ATTEMPTS", default_value_t = 600)]
    max_attempts: u32,

    /// Extra tries for a status check that hit a network or 5xx error
    #[arg(long, env = "AQEED_TRANSPORT_RETRIES", default_value_t = 0)]
    transport_retries: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so results on stdout stay pipeable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.backend_url)
        .with_poll_interval_ms(cli.interval_ms)
        .with_max_attempts(cli.max_attempts)
        .with_transport_retries(cli.transport_retries);
    config.validate()?;

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_log_filter_shows_poller_outcomes() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "aqeed_client::poller", Level::INFO));
            assert!(tracing::enabled!(target: "aqeed", Level::INFO));
            assert!(!tracing::enabled!(target: "aqeed_client::poller", Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper", Level::INFO));
        });
    }

    #[test]
    fn test_cli_parses_poll_flags() {
        let cli = Cli::try_parse_from([
            "aqeed",
            "--interval-ms",
            "500",
            "--max-attempts",
            "10",
            "worker",
            "status",
        ])
        .unwrap();

        assert_eq!(cli.interval_ms, 500);
        assert_eq!(cli.max_attempts, 10);
        assert_eq!(cli.transport_retries, 0);
    }
}
