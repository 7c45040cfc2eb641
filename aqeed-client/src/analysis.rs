//! Contract and resume analysis endpoints
//!
//! Each call returns a [`SubmitOutcome`]: a job id when the backend queued
//! the work, or the result when it ran inline.

use crate::error::Result;
use crate::{BackendClient, SubmitMode, SubmitOutcome, require_non_blank};
use aqeed_core::dto::analysis::{QuestionRequest, ScoreContractsRequest, WorkspaceRequest};

impl BackendClient {
    /// Ask a question about a workspace's documents
    pub async fn ask_question(
        &self,
        req: QuestionRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        require_non_blank("workspace_name", &req.workspace_name)?;
        require_non_blank("query", &req.query)?;

        let url = self.endpoint(&["qa"])?;
        let response = self
            .client
            .post(url)
            .query(&mode.as_query())
            .json(&req)
            .send()
            .await?;

        self.handle_submit_response(response).await
    }

    /// Score all contracts in a workspace against a criterion
    pub async fn score_contracts(
        &self,
        req: ScoreContractsRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        require_non_blank("workspace_name", &req.workspace_name)?;
        require_non_blank("criterion", &req.criterion)?;

        let url = self.endpoint(&["score"])?;
        let response = self
            .client
            .post(url)
            .query(&mode.as_query())
            .json(&req)
            .send()
            .await?;

        self.handle_submit_response(response).await
    }

    /// Run a compliance audit over a workspace's contracts
    pub async fn audit_contracts(
        &self,
        req: WorkspaceRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        self.submit_workspace_analysis("audit", req, mode).await
    }

    /// Run legal clause analysis over a workspace's contracts
    pub async fn legal_analysis(
        &self,
        req: WorkspaceRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        self.submit_workspace_analysis("legal", req, mode).await
    }

    /// Score uploaded resumes against the workspace's job description
    pub async fn score_resumes(&self, workspace_name: &str, mode: SubmitMode) -> Result<SubmitOutcome> {
        require_non_blank("workspace_name", workspace_name)?;

        let url = self.endpoint(&["score-resumes", workspace_name])?;
        let response = self
            .client
            .post(url)
            .query(&mode.as_query())
            .send()
            .await?;

        self.handle_submit_response(response).await
    }

    async fn submit_workspace_analysis(
        &self,
        endpoint: &str,
        req: WorkspaceRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        require_non_blank("workspace_name", &req.workspace_name)?;

        let url = self.endpoint(&[endpoint])?;
        let response = self
            .client
            .post(url)
            .query(&mode.as_query())
            .json(&req)
            .send()
            .await?;

        self.handle_submit_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientError, JobId};
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_ask_question_async() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/qa")
            .match_query(Matcher::UrlEncoded("async_mode".into(), "true".into()))
            .match_body(Matcher::PartialJson(json!({
                "workspace_name": "acme",
                "query": "What is the notice period?"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"job_id": "job-42"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let outcome = client
            .ask_question(
                QuestionRequest::new("acme", "What is the notice period?"),
                SubmitMode::Async,
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Async {
                job_id: JobId::new("job-42")
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_score_contracts_sync_returns_result() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"scores": [{"contract": "msa.pdf", "score": 7}]});
        let _mock = server
            .mock("POST", "/score")
            .match_query(Matcher::UrlEncoded("async_mode".into(), "false".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let outcome = client
            .score_contracts(
                ScoreContractsRequest::new("acme", "Liability caps", 10),
                SubmitMode::Sync,
            )
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Immediate { result: body });
    }

    #[tokio::test]
    async fn test_audit_and_legal_paths() {
        let mut server = mockito::Server::new_async().await;
        let audit = server
            .mock("POST", "/audit")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({"workspace_name": "acme"})))
            .with_status(200)
            .with_body(r#"{"job_id": "a1"}"#)
            .create_async()
            .await;
        let legal = server
            .mock("POST", "/legal")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"job_id": "l1"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let audited = client
            .audit_contracts(WorkspaceRequest::new("acme"), SubmitMode::Async)
            .await
            .unwrap();
        let analysed = client
            .legal_analysis(WorkspaceRequest::new("acme"), SubmitMode::Async)
            .await
            .unwrap();

        assert_eq!(audited.job_id().map(JobId::as_str), Some("a1"));
        assert_eq!(analysed.job_id().map(JobId::as_str), Some("l1"));
        audit.assert_async().await;
        legal.assert_async().await;
    }

    #[tokio::test]
    async fn test_score_resumes_uses_workspace_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/score-resumes/hiring")
            .match_query(Matcher::UrlEncoded("async_mode".into(), "true".into()))
            .with_status(200)
            .with_body(r#"{"job_id": "r1"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let outcome = client.score_resumes("hiring", SubmitMode::Async).await.unwrap();

        assert_eq!(outcome.job_id().map(JobId::as_str), Some("r1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_score_resumes_encodes_workspace() {
        let mut server = mockito::Server::new_async().await;
        let encoded = server
            .mock("POST", "/score-resumes/team%231")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"job_id": "right"}"#)
            .create_async()
            .await;
        let truncated = server
            .mock("POST", "/score-resumes/team")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"job_id": "wrong"}"#)
            .expect(0)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let outcome = client.score_resumes("team#1", SubmitMode::Async).await.unwrap();

        assert_eq!(outcome.job_id().map(JobId::as_str), Some("right"));
        encoded.assert_async().await;
        truncated.assert_async().await;
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected_locally() {
        let client = BackendClient::new("http://localhost:1");
        let err = client
            .ask_question(QuestionRequest::new("acme", ""), SubmitMode::Async)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
