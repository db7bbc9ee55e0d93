//! Wire types exchanged with the quiz backend.
//!
//! These mirror the JSON bodies of `GET /`, `GET /history` and `POST /quiz`.
//! Unknown fields are ignored so the dashboard keeps working when the backend
//! grows new ones.

use serde::{Deserialize, Serialize};

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Human-readable service name.
    pub service: String,
    /// Free-form status string (e.g. "running").
    pub status: String,
    /// Backend version string.
    pub version: String,
}

/// Outcome of a recorded quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
    /// Any status the dashboard does not recognise. Not counted in stats.
    #[serde(other)]
    Other,
}

impl RunStatus {
    /// Badge shown in the history list.
    pub fn badge(&self) -> &'static str {
        match self {
            RunStatus::Success => "✓ Success",
            RunStatus::Failed | RunStatus::Other => "✗ Failed",
        }
    }
}

/// One past quiz run as reported by `GET /history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub email: String,
    pub initial_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    pub status: RunStatus,
    /// Elapsed time in seconds.
    pub time_taken: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Envelope of `GET /history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
}

/// Body of `POST /quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    pub email: String,
    pub secret: String,
    pub url: String,
}

/// Response of `POST /quiz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// `"ok"` when the chain completed, `"error"` otherwise.
    pub status: String,
    pub time_taken: f64,
    #[serde(default)]
    pub final_answer: serde_json::Value,
    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quizzes_solved: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobResult {
    /// Whether the backend reported the job as fully successful.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// The final answer rendered as compact JSON.
    pub fn answer_json(&self) -> String {
        serde_json::to_string(&self.final_answer).unwrap_or_else(|_| "null".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_optional_fields() {
        let json = r#"{
            "timestamp": "2025-11-02T10:15:30.123456",
            "email": "student@example.com",
            "initial_url": "https://example.com/quiz-1",
            "status": "failed",
            "time_taken": 4.5,
            "error": "timeout"
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, RunStatus::Failed);
        assert!(entry.final_url.is_none());
        assert!(entry.quiz_count.is_none());
        assert_eq!(entry.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_unknown_status_maps_to_other() {
        let json = r#"{"timestamp":"t","email":"e","initial_url":"u","status":"running","time_taken":1.0}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, RunStatus::Other);
    }

    #[test]
    fn test_service_status_ignores_extra_fields() {
        let json = r#"{"service":"Quiz Bot","status":"running","version":"1.0.0","timestamp":"x"}"#;
        let status: ServiceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.service, "Quiz Bot");
        assert_eq!(status.version, "1.0.0");
    }

    #[test]
    fn test_job_result_answer_json() {
        let json = r#"{"status":"ok","time_taken":1.23,"final_answer":{"answer":42},"steps":[{"step":"load"}]}"#;
        let result: JobResult = serde_json::from_str(json).unwrap();
        assert!(result.is_ok());
        assert_eq!(result.answer_json(), r#"{"answer":42}"#);
        assert_eq!(result.steps.len(), 1);
        assert!(result.message.is_none());
    }
}
