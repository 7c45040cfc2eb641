//! Configuration module
//!
//! Backend connection and job polling settings, filled from CLI flags or
//! their `AQEED_*` environment variables.

use std::sync::Arc;
use std::time::Duration;

use aqeed_client::poller::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use aqeed_client::{BackendClient, PollOptions};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the analysis backend
    pub backend_url: String,

    /// How often to check a job's status
    pub poll_interval: Duration,

    /// Status checks before giving up on a job
    pub max_attempts: u32,

    /// Extra tries for a status check after a transient failure
    pub transport_retries: u32,
}

impl Config {
    /// Creates a new configuration with default polling settings
    pub fn new(backend_url: String) -> Self {
        Self {
            backend_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            transport_retries: 0,
        }
    }

    pub fn with_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.poll_interval = Duration::from_millis(interval_ms);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_transport_retries(mut self, retries: u32) -> Self {
        self.transport_retries = retries;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.is_empty() {
            anyhow::bail!("backend_url cannot be empty");
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            anyhow::bail!("backend_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        Ok(())
    }

    pub fn client(&self) -> Arc<BackendClient> {
        Arc::new(BackendClient::new(self.backend_url.as_str()))
    }

    pub fn poll_options(&self) -> PollOptions {
        PollOptions::new()
            .with_interval(self.poll_interval)
            .with_max_attempts(self.max_attempts)
            .with_transport_retries(self.transport_retries)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8000".to_string())
    }
}
