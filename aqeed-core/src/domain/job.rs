//! Job domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque job identifier issued by the backend at submission time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Job status as reported by `GET /jobs/{job_id}`
///
/// `Pending`, `Started` and `Processing` are in flight. Statuses the client
/// does not recognise deserialize to `Unknown` and are also treated as in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Started,
    Processing,
    Success,
    Failure,
    NotFound,
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// The backend will not move the job out of a terminal status
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::NotFound)
    }

    pub fn is_in_flight(self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Started => "STARTED",
            Self::Processing => "PROCESSING",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::NotFound => "NOT_FOUND",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Snapshot of a backend job
///
/// `result` is only meaningful on `Success` and `error` only on `Failure`.
/// The payload shapes are operation-specific and are not interpreted here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    /// Backend error message, ignoring empty or whitespace-only strings
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}
