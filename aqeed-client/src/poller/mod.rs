//! Job poller
//!
//! Turns a backend job id into exactly one outcome. A session checks the
//! job's status immediately, then once per interval, until the job reaches
//! a terminal status, the attempt budget runs out, a status check fails, or
//! the owner cancels.
//!
//! Checks within a session are strictly sequential. Sessions share nothing
//! but the status source.

mod options;
mod session;

pub use options::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, PollOptions, StatusCallback};
pub use session::{CancelHandle, PollOutcome, PollSession, PollSlot};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use aqeed_core::domain::job::{Job, JobId, JobStatus};
use aqeed_core::domain::submit::SubmitOutcome;
use serde_json::Value;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::BackendClient;
use crate::error::{ClientError, PollError, Result};

/// Message used when the backend reports `FAILURE` without saying why
pub const DEFAULT_FAILURE_MESSAGE: &str = "Job failed without an error message";

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Where the poller reads job status from
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    /// Fetch the current state of a job
    async fn job_status(&self, job_id: &JobId) -> Result<Job>;
}

#[async_trait]
impl JobStatusSource for BackendClient {
    async fn job_status(&self, job_id: &JobId) -> Result<Job> {
        self.get_job(job_id).await
    }
}

/// Starts poll sessions against a status source
#[derive(Clone)]
pub struct JobPoller {
    source: Arc<dyn JobStatusSource>,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(source: Arc<dyn JobStatusSource>) -> Self {
        Self { source }
    }

    /// Start polling a job
    ///
    /// The first status check is issued right away on a background task.
    /// Must be called from within a tokio runtime.
    pub fn start(&self, job_id: JobId, options: PollOptions) -> std::result::Result<PollSession, PollError> {
        if job_id.is_blank() {
            return Err(PollError::InvalidOptions(
                "job_id must not be empty".to_string(),
            ));
        }
        options.validate()?;

        debug!(
            job_id = %job_id,
            interval_ms = options.interval.as_millis() as u64,
            max_attempts = options.max_attempts,
            "Starting poll session"
        );

        let token = CancellationToken::new();
        let attempts = Arc::new(AtomicU32::new(0));

        let task = PollTask {
            source: Arc::clone(&self.source),
            job_id: job_id.clone(),
            options: options.clone(),
            attempts: Arc::clone(&attempts),
            token: token.clone(),
        };
        let handle = tokio::spawn(task.run());

        Ok(PollSession::new(job_id, &options, attempts, token, handle))
    }

    /// Resolve a submission to its result
    ///
    /// Immediate results are returned as they are, without polling. Queued
    /// work is polled to completion. `None` means the session was cancelled.
    pub async fn resolve(&self, submitted: SubmitOutcome, options: PollOptions) -> Option<PollOutcome> {
        match submitted {
            SubmitOutcome::Immediate { result } => Some(Ok(result)),
            SubmitOutcome::Async { job_id } => match self.start(job_id, options) {
                Ok(session) => session.outcome().await,
                Err(e) => Some(Err(e)),
            },
        }
    }
}

/// State moved into the background task of one session
struct PollTask {
    source: Arc<dyn JobStatusSource>,
    job_id: JobId,
    options: PollOptions,
    attempts: Arc<AtomicU32>,
    token: CancellationToken,
}

impl PollTask {
    async fn run(self) -> Option<PollOutcome> {
        let job_id = &self.job_id;
        let max_attempts = self.options.max_attempts;

        loop {
            if self.token.is_cancelled() {
                debug!(job_id = %job_id, "Poll session cancelled");
                return None;
            }

            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(job_id = %job_id, attempt, max_attempts, "Checking job status");

            let checked = self.check_status().await;

            // The answer to a request issued before cancellation is dropped silently
            if self.token.is_cancelled() {
                debug!(job_id = %job_id, attempt, "Poll session cancelled during status check");
                return None;
            }

            let job = match checked {
                Ok(job) => job,
                Err(e) => {
                    warn!(job_id = %job_id, attempt, "Status check failed: {}", e);
                    return Some(Err(PollError::Transport(e)));
                }
            };

            self.options.notify(job_id, &job);

            match job.status {
                JobStatus::Success => {
                    info!(job_id = %job_id, attempt, "Job succeeded");
                    return Some(Ok(job.result.unwrap_or(Value::Null)));
                }
                JobStatus::Failure => {
                    let message = job
                        .error_message()
                        .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                        .to_string();
                    info!(job_id = %job_id, attempt, "Job failed: {}", message);
                    return Some(Err(PollError::JobFailed { message }));
                }
                JobStatus::NotFound => {
                    info!(job_id = %job_id, attempt, "Job not found");
                    return Some(Err(PollError::JobNotFound {
                        job_id: job_id.clone(),
                    }));
                }
                JobStatus::Unknown => {
                    warn!(job_id = %job_id, attempt, "Unrecognised job status, treating as in flight");
                }
                JobStatus::Pending | JobStatus::Started | JobStatus::Processing => {}
            }

            if attempt >= max_attempts {
                info!(job_id = %job_id, attempts = attempt, "Gave up waiting for job");
                return Some(Err(PollError::Timeout {
                    job_id: job_id.clone(),
                    attempts: attempt,
                }));
            }

            tokio::select! {
                _ = self.token.cancelled() => {
                    debug!(job_id = %job_id, "Poll session cancelled while waiting");
                    return None;
                }
                _ = time::sleep(self.options.interval) => {}
            }
        }
    }

    /// One status check, retried on transient failures when configured
    ///
    /// Retries do not count as attempts.
    async fn check_status(&self) -> std::result::Result<Job, ClientError> {
        let mut retries_left = self.options.transport_retries;
        let mut delay = INITIAL_RETRY_DELAY;

        loop {
            match self.source.job_status(&self.job_id).await {
                Ok(job) => return Ok(job),
                Err(e) if retries_left > 0 && e.is_transient() => {
                    retries_left -= 1;
                    warn!(
                        job_id = %self.job_id,
                        retries_left,
                        "Transient status check failure, retrying in {:?}: {}",
                        delay,
                        e
                    );

                    tokio::select! {
                        _ = self.token.cancelled() => return Err(e),
                        _ = time::sleep(delay) => {}
                    }

                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
