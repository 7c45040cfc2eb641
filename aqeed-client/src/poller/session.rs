//! Poll session handles
//!
//! A [`PollSession`] owns the background task polling one job. Dropping the
//! session cancels it, so no timer outlives its owner.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use aqeed_core::domain::job::JobId;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::JobPoller;
use super::options::PollOptions;
use crate::error::PollError;

/// Result of a session that was not cancelled
pub type PollOutcome = Result<Value, PollError>;

/// Cloneable handle that stops a poll session
///
/// Cancelling means "stop notifying me": no further status check is issued
/// and no outcome is delivered. A request already in flight is not aborted.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Handle to one poll loop for one job
#[derive(Debug)]
pub struct PollSession {
    job_id: JobId,
    interval: Duration,
    max_attempts: u32,
    attempts: Arc<AtomicU32>,
    token: CancellationToken,
    task: Option<JoinHandle<Option<PollOutcome>>>,
}

impl PollSession {
    pub(crate) fn new(
        job_id: JobId,
        options: &PollOptions,
        attempts: Arc<AtomicU32>,
        token: CancellationToken,
        task: JoinHandle<Option<PollOutcome>>,
    ) -> Self {
        Self {
            job_id,
            interval: options.interval,
            max_attempts: options.max_attempts,
            attempts,
            token,
            task: Some(task),
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Status checks performed so far
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!(job_id = %self.job_id, attempts = self.attempts(), "Cancelling poll session");
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.token.clone(),
        }
    }

    /// True once the background task has stopped
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the session's single outcome
    ///
    /// Returns `None` if the session was cancelled, including when it was
    /// cancelled after the backend answered but before the outcome was taken.
    pub async fn outcome(mut self) -> Option<PollOutcome> {
        let task = self.task.take()?;

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => None,
        };

        if self.token.is_cancelled() {
            return None;
        }
        outcome
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// At most one active poll per logical operation
///
/// Starting or claiming a new session through the slot cancels the session
/// that held it before, so a superseded poll can never deliver an outcome.
///
/// # Example
///
/// A user resubmits a question before the first answer arrived:
///
/// ```no_run
/// use std::sync::Arc;
/// use aqeed_client::{BackendClient, JobId, JobPoller, PollError, PollOptions, PollSlot};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), PollError> {
/// let poller = JobPoller::new(Arc::new(BackendClient::new("http://localhost:8000")));
/// let mut slot = PollSlot::new();
///
/// let first = slot.start(&poller, JobId::new("job-1"), PollOptions::default())?;
/// let second = slot.start(&poller, JobId::new("job-2"), PollOptions::default())?;
///
/// // job-1 was superseded and stays silent
/// assert!(first.is_cancelled());
/// assert!(first.outcome().await.is_none());
///
/// assert_eq!(slot.current_job_id(), Some(&JobId::new("job-2")));
/// if let Some(answer) = second.outcome().await {
///     println!("{}", answer?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PollSlot {
    current: Option<(JobId, CancelHandle)>,
}

impl PollSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling `job_id`, superseding the current session
    pub fn start(
        &mut self,
        poller: &JobPoller,
        job_id: JobId,
        options: PollOptions,
    ) -> Result<PollSession, PollError> {
        let session = poller.start(job_id, options)?;
        self.claim(&session);
        Ok(session)
    }

    /// Hand the slot to `session`, cancelling the previous holder
    pub fn claim(&mut self, session: &PollSession) {
        self.cancel();
        self.current = Some((session.job_id().clone(), session.cancel_handle()));
    }

    /// Cancel whichever session holds the slot
    pub fn cancel(&mut self) {
        if let Some((job_id, handle)) = self.current.take() {
            if !handle.is_cancelled() {
                debug!(job_id = %job_id, "Superseding poll session");
                handle.cancel();
            }
        }
    }

    pub fn current_job_id(&self) -> Option<&JobId> {
        self.current.as_ref().map(|(job_id, _)| job_id)
    }
}
