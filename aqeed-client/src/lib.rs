//! Aqeed HTTP Client
//!
//! A type-safe client for the Aqeed analysis backend, plus the job poller
//! that every long-running operation goes through.
//!
//! Long-running operations (question answering, contract and resume scoring,
//! audits, legal analysis, vendor research) are queued by the backend and
//! answered with a job id. [`JobPoller`] turns that id into exactly one
//! outcome.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aqeed_client::{BackendClient, JobPoller, PollOptions, SubmitMode};
//! use aqeed_core::dto::analysis::QuestionRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(BackendClient::new("http://localhost:8000"));
//!     let poller = JobPoller::new(client.clone());
//!
//!     let submitted = client
//!         .ask_question(QuestionRequest::new("acme", "What is the notice period?"), SubmitMode::Async)
//!         .await?;
//!
//!     if let Some(answer) = poller.resolve(submitted, PollOptions::default()).await {
//!         println!("{}", answer?);
//!     }
//!     Ok(())
//! }
//! ```

mod analysis;
pub mod error;
mod jobs;
pub mod poller;
mod vendors;

// Re-export commonly used types
pub use aqeed_core::domain::job::{Job, JobId, JobStatus};
pub use aqeed_core::domain::submit::SubmitOutcome;
pub use error::{ClientError, PollError, Result};
pub use poller::{CancelHandle, JobPoller, JobStatusSource, PollOptions, PollSession, PollSlot};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the Aqeed backend API
///
/// Methods are organized into groups:
/// - Job status and generic job submission
/// - Contract analysis (questions, scoring, audit, legal, resumes)
/// - Vendor research
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

/// How a feature endpoint should run the submitted work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// Queue a job and answer with its id
    #[default]
    Async,
    /// Run inline and answer with the result
    Sync,
}

impl SubmitMode {
    /// Value of the backend's `async_mode` query parameter
    fn as_query(self) -> [(&'static str, bool); 1] {
        [("async_mode", self == Self::Async)]
    }
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use aqeed_client::BackendClient;
    ///
    /// let client = BackendClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use aqeed_client::BackendClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BackendClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments
    ///
    /// Each segment is percent-encoded, so a workspace or job id containing
    /// `/`, `?` or `#` stays a single segment. A path prefix on the base URL
    /// (e.g. "http://host/api") is kept.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!("Base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle a feature endpoint response that may carry a job id or a result
    async fn handle_submit_response(&self, response: reqwest::Response) -> Result<SubmitOutcome> {
        let body: serde_json::Value = self.handle_response(response).await?;
        Ok(SubmitOutcome::from_response(body))
    }
}

/// Reject blank path parameters before they turn into odd URLs
fn require_non_blank(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} must not be empty", name)));
    }
    Ok(())
}
