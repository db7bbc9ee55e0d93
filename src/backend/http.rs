//! HTTP implementation of [`QuizBackend`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::types::HistoryResponse;
use super::{ApiError, HistoryEntry, JobResult, QuizBackend, QuizRequest, ServiceStatus};

/// A backend reached over HTTP at a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    description: String,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    ///
    /// A trailing slash on the base URL is ignored.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a backend that uses an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let description = format!("backend: {}", base_url);
        Self {
            client,
            base_url,
            description,
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl QuizBackend for HttpBackend {
    fn description(&self) -> &str {
        &self.description
    }

    async fn status(&self) -> Result<ServiceStatus, ApiError> {
        let response = self.client.get(self.endpoint("/")).send().await;
        decode(response).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let response = self.client.get(self.endpoint("/history")).send().await;
        let body: HistoryResponse = decode(response).await?;
        Ok(body.history.unwrap_or_default())
    }

    async fn submit(&self, request: &QuizRequest) -> Result<JobResult, ApiError> {
        let response = self.client.post(self.endpoint("/quiz")).json(request).send().await;
        decode(response).await
    }
}

/// Turn a raw `reqwest` outcome into a typed body or an [`ApiError`].
async fn decode<T: DeserializeOwned>(
    response: Result<Response, reqwest::Error>,
) -> Result<T, ApiError> {
    let response = response.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Backend {
            status: status.as_u16(),
            detail: error_detail(&bytes)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16())),
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extract the `detail` message from an error body, if there is one.
///
/// String details are returned verbatim; structured details (e.g. a list of
/// validation errors) are returned as compact JSON.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
