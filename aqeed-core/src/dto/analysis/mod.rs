//! Contract analysis request bodies

use serde::{Deserialize, Serialize};

/// Question answering over a workspace's documents (`POST /qa`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub query: String,
    pub workspace_name: String,
    pub response_size: String,
    pub response_type: String,
    pub compare_chatgpt: bool,
    pub share_data_with_chatgpt: bool,
    pub use_web: bool,
    /// Restrict web answers to a single site; empty means no restriction
    pub specific_url: String,
}

impl QuestionRequest {
    pub fn new(workspace_name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            workspace_name: workspace_name.into(),
            response_size: "medium".to_string(),
            response_type: "sentence".to_string(),
            compare_chatgpt: true,
            share_data_with_chatgpt: true,
            use_web: false,
            specific_url: String::new(),
        }
    }
}

/// Score every contract in a workspace against one criterion (`POST /score`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreContractsRequest {
    pub criterion: String,
    pub workspace_name: String,
    pub max_score: u32,
    pub compare_chatgpt: bool,
    pub share_data_with_chatgpt: bool,
}

impl ScoreContractsRequest {
    pub fn new(
        workspace_name: impl Into<String>,
        criterion: impl Into<String>,
        max_score: u32,
    ) -> Self {
        Self {
            criterion: criterion.into(),
            workspace_name: workspace_name.into(),
            max_score,
            compare_chatgpt: true,
            share_data_with_chatgpt: true,
        }
    }
}

/// Body for workspace-wide analyses (`POST /audit`, `POST /legal`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceRequest {
    pub workspace_name: String,
}

impl WorkspaceRequest {
    pub fn new(workspace_name: impl Into<String>) -> Self {
        Self {
            workspace_name: workspace_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_request_defaults() {
        let req = QuestionRequest::new("acme", "What is the notice period?");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "query": "What is the notice period?",
                "workspace_name": "acme",
                "response_size": "medium",
                "response_type": "sentence",
                "compare_chatgpt": true,
                "share_data_with_chatgpt": true,
                "use_web": false,
                "specific_url": ""
            })
        );
    }

    #[test]
    fn test_score_request_serializes_max_score() {
        let req = ScoreContractsRequest::new("acme", "Termination clauses", 10);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["max_score"], 10);
        assert_eq!(value["criterion"], "Termination clauses");
    }
}
