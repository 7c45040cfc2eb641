//! Submission outcome
//!
//! Feature endpoints either queue a job and answer with `{ "job_id": ... }`,
//! or run synchronously and answer with the result itself.

use serde_json::Value;

use super::job::JobId;

/// What a submit call returned
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Work was queued; poll the job to get the result
    Async { job_id: JobId },
    /// Work already ran; the body is the result
    Immediate { result: Value },
}

impl SubmitOutcome {
    /// Classify a submit response body
    ///
    /// Only an object with a non-empty string `job_id` is treated as queued work.
    pub fn from_response(body: Value) -> Self {
        match body.get("job_id").and_then(Value::as_str) {
            Some(id) if !id.trim().is_empty() => Self::Async {
                job_id: JobId::new(id),
            },
            _ => Self::Immediate { result: body },
        }
    }

    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Self::Async { job_id } => Some(job_id),
            Self::Immediate { .. } => None,
        }
    }
}

impl From<Value> for SubmitOutcome {
    fn from(body: Value) -> Self {
        Self::from_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_id_body_is_async() {
        let outcome = SubmitOutcome::from_response(json!({"job_id": "job-42"}));
        assert_eq!(
            outcome,
            SubmitOutcome::Async {
                job_id: JobId::new("job-42")
            }
        );
        assert_eq!(outcome.job_id().map(JobId::as_str), Some("job-42"));
    }

    #[test]
    fn test_direct_result_is_immediate() {
        let body = json!({"answer": "42", "sources": []});
        let outcome = SubmitOutcome::from(body.clone());
        assert_eq!(outcome, SubmitOutcome::Immediate { result: body });
        assert!(outcome.job_id().is_none());
    }

    #[test]
    fn test_empty_or_non_string_job_id_is_immediate() {
        let empty = json!({"job_id": ""});
        assert!(matches!(
            SubmitOutcome::from_response(empty),
            SubmitOutcome::Immediate { .. }
        ));

        let numeric = json!({"job_id": 7});
        assert!(matches!(
            SubmitOutcome::from_response(numeric),
            SubmitOutcome::Immediate { .. }
        ));

        let list = json!([{"job_id": "nested"}]);
        assert!(matches!(
            SubmitOutcome::from_response(list),
            SubmitOutcome::Immediate { .. }
        ));
    }
}
