//! Error types for the Aqeed client

use aqeed_core::domain::job::JobId;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Whether asking again could plausibly succeed
    ///
    /// Connection-level failures and 5xx responses are transient. Malformed
    /// requests, 4xx responses and unparseable bodies are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RequestFailed(_)) || self.is_server_error()
    }
}

/// Terminal failures of a poll session
#[derive(Debug, Error)]
pub enum PollError {
    /// The backend reported `FAILURE`
    #[error("Job failed: {message}")]
    JobFailed { message: String },

    /// The backend does not know the job id (invalid or expired)
    #[error("Job not found: {job_id}")]
    JobNotFound { job_id: JobId },

    /// The attempt budget ran out while the job was still in flight
    ///
    /// The job may still complete on the backend.
    #[error("Timed out waiting for job {job_id} after {attempts} status checks")]
    Timeout { job_id: JobId, attempts: u32 },

    /// The status check itself failed
    #[error("Could not check job status: {0}")]
    Transport(#[source] ClientError),

    /// `start` was called with an unusable job id or options
    #[error("Invalid poll options: {0}")]
    InvalidOptions(String),
}
