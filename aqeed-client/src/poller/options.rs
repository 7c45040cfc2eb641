//! Poll session options

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use aqeed_core::domain::job::{Job, JobId};
use tracing::warn;

use crate::error::PollError;

/// Delay between two status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Status checks before a session gives up (30 minutes at the default interval)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 600;

/// Callback fired with the raw job after every status check
pub type StatusCallback = Arc<dyn Fn(&Job) + Send + Sync>;

/// Options for a single poll session
#[derive(Clone)]
pub struct PollOptions {
    /// Fixed delay between status checks
    pub interval: Duration,

    /// Ceiling on status checks before the session times out
    pub max_attempts: u32,

    /// Extra tries for one status check after a transient transport failure.
    /// Zero means a failed check ends the session.
    pub transport_retries: u32,

    on_status_change: Option<StatusCallback>,
}

impl PollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
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

    /// Observe every status check, e.g. to drive a progress display
    ///
    /// A panic inside the callback is caught and logged; it never ends the session.
    pub fn on_status_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Job) + Send + Sync + 'static,
    {
        self.on_status_change = Some(Arc::new(callback));
        self
    }

    /// Validates the options
    pub fn validate(&self) -> Result<(), PollError> {
        if self.interval.is_zero() {
            return Err(PollError::InvalidOptions(
                "interval must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(PollError::InvalidOptions(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub(crate) fn notify(&self, job_id: &JobId, job: &Job) {
        let Some(callback) = &self.on_status_change else {
            return;
        };

        if catch_unwind(AssertUnwindSafe(|| callback(job))).is_err() {
            warn!(job_id = %job_id, "Status change callback panicked; ignoring");
        }
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            transport_retries: 0,
            on_status_change: None,
        }
    }
}

impl fmt::Debug for PollOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollOptions")
            .field("interval", &self.interval)
            .field("max_attempts", &self.max_attempts)
            .field("transport_retries", &self.transport_retries)
            .field("on_status_change", &self.on_status_change.is_some())
            .finish()
    }
}
