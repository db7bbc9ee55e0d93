//! Backend access for the quiz-automation service.
//!
//! This module provides a trait-based abstraction over the three calls the
//! dashboard makes (service status, run history, job submission), an HTTP
//! implementation, and the plumbing that runs those calls off the UI thread.
//!
//! ```text
//!  UI thread                         tokio runtime
//! ┌──────────┐   fetch_*/submit    ┌─────────────┐     HTTP     ┌─────────┐
//! │   App    │────────────────────▶│ Dispatcher  │─────────────▶│ Backend │
//! │          │◀────────────────────│  / Poller   │◀─────────────│         │
//! └──────────┘   ApiEvent (mpsc)   └─────────────┘              └─────────┘
//! ```

pub(crate) mod dispatch;
mod http;
mod poll;
mod types;

pub use dispatch::{ApiEvent, Dispatcher};
pub use http::HttpBackend;
pub use poll::{PollHandle, Poller};
pub use types::{HistoryEntry, JobResult, QuizRequest, RunStatus, ServiceStatus};

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by backend calls.
///
/// The `Display` text is what the operator sees in the form's error panel
/// and in the log buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// A success response whose body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// The three calls the dashboard makes against the backend.
///
/// Each call is a single attempt: no retry and no timeout override.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Human-readable description of the backend (shown in the status bar).
    fn description(&self) -> &str;

    /// `GET /`
    async fn status(&self) -> Result<ServiceStatus, ApiError>;

    /// `GET /history`
    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `POST /quiz`
    async fn submit(&self, request: &QuizRequest) -> Result<JobResult, ApiError>;
}
