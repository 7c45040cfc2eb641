//! Job DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobId;

/// Response of the generic `POST /jobs/{job_type}` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    pub job_id: JobId,
}

/// Background worker health, from `GET /worker/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerStatus {
    /// "running" or "error"
    pub status: String,
    pub redis_connected: bool,
    #[serde(default)]
    pub jobs_in_queue: Option<u64>,
    #[serde(default)]
    pub worker_thread_alive: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl WorkerStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "running" && self.redis_connected && self.worker_thread_alive
    }
}
