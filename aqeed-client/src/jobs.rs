//! Job-related API endpoints

use crate::error::Result;
use crate::{BackendClient, require_non_blank};
use aqeed_core::domain::job::{Job, JobId};
use aqeed_core::dto::job::{SubmitJobResponse, WorkerStatus};
use serde::Serialize;

impl BackendClient {
    // =============================================================================
    // Job Status
    // =============================================================================

    /// Get the current status of a job
    ///
    /// An unknown id is not an HTTP error: the backend answers 200 with
    /// status `NOT_FOUND`.
    ///
    /// # Arguments
    /// * `job_id` - The job id returned at submission
    pub async fn get_job(&self, job_id: &JobId) -> Result<Job> {
        require_non_blank("job_id", job_id.as_str())?;

        let url = self.endpoint(&["jobs", job_id.as_str()])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Generic Submission
    // =============================================================================

    /// Queue a job of any type the worker understands
    ///
    /// # Arguments
    /// * `job_type` - Worker job type (e.g., "qa_processing", "audit_contracts")
    /// * `payload` - Job payload, passed to the worker unchanged
    ///
    /// # Returns
    /// The id of the queued job
    ///
    /// # Example
    /// ```no_run
    /// # use aqeed_client::BackendClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = BackendClient::new("http://localhost:8000");
    /// let job_id = client
    ///     .submit_job("audit_contracts", &serde_json::json!({"workspace_name": "acme"}))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_job<P: Serialize + ?Sized>(
        &self,
        job_type: &str,
        payload: &P,
    ) -> Result<JobId> {
        require_non_blank("job_type", job_type)?;

        let url = self.endpoint(&["jobs", job_type])?;
        let response = self.client.post(url).json(payload).send().await?;

        let submitted: SubmitJobResponse = self.handle_response(response).await?;
        Ok(submitted.job_id)
    }

    // =============================================================================
    // Worker
    // =============================================================================

    /// Get the health of the backend's job worker
    pub async fn worker_status(&self) -> Result<WorkerStatus> {
        let url = self.endpoint(&["worker", "status"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use aqeed_core::domain::job::JobStatus;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_job_parses_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs/job-42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "SUCCESS",
                    "job_type": "qa_processing",
                    "payload": {"workspace_name": "acme"},
                    "result": {"answer": "42"},
                    "error": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let job = client.get_job(&JobId::new("job-42")).await.unwrap();

        assert_eq!(job.status, JobStatus::Success);
        assert_eq!(job.result, Some(json!({"answer": "42"})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_job_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/job-42")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.get_job(&JobId::new("job-42")).await.unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_job_unparseable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/job-42")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.get_job(&JobId::new("job-42")).await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_get_job_encodes_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs/a%2Fb%3Fc")
            .with_status(200)
            .with_body(r#"{"status": "PENDING"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let job = client.get_job(&JobId::new("a/b?c")).await.unwrap();

        assert_eq!(job.status, JobStatus::Pending);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_job_rejects_blank_id() {
        let client = BackendClient::new("http://localhost:1");
        let err = client.get_job(&JobId::new(" ")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_submit_job_returns_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/jobs/audit_contracts")
            .match_body(Matcher::Json(json!({"workspace_name": "acme"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"job_id": "5f0c"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let job_id = client
            .submit_job("audit_contracts", &json!({"workspace_name": "acme"}))
            .await
            .unwrap();

        assert_eq!(job_id, JobId::new("5f0c"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_worker_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/worker/status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "running",
                    "redis_connected": true,
                    "jobs_in_queue": 3,
                    "worker_thread_alive": true
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let status = client.worker_status().await.unwrap();

        assert!(status.is_healthy());
        assert_eq!(status.jobs_in_queue, Some(3));
    }
}
