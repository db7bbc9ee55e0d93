//! Runs backend calls on the tokio runtime and reports completions back to
//! the UI thread.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{ApiError, HistoryEntry, JobResult, QuizBackend, QuizRequest, ServiceStatus};

/// Completion of a backend call, delivered to the UI thread.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    Status(Result<ServiceStatus, ApiError>),
    History {
        /// Token taken when the request was issued. Higher is newer.
        token: u64,
        result: Result<Vec<HistoryEntry>, ApiError>,
    },
    Submitted(Result<JobResult, ApiError>),
}

/// Issues backend calls without blocking the caller.
///
/// Cloning is cheap; all clones share the backend, the event channel and the
/// history request counter.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn QuizBackend>,
    runtime: Handle,
    events: mpsc::UnboundedSender<ApiEvent>,
    history_seq: Arc<AtomicU64>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("backend", &self.backend.description())
            .field("history_seq", &self.history_seq.load(Ordering::Relaxed))
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher that spawns onto `runtime`.
    ///
    /// Returns the dispatcher and the receiving end of its event channel.
    pub fn new(
        backend: Arc<dyn QuizBackend>,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<ApiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            backend,
            runtime,
            events: tx,
            history_seq: Arc::new(AtomicU64::new(0)),
        };
        (dispatcher, rx)
    }

    /// Returns the backend description.
    pub fn description(&self) -> &str {
        self.backend.description()
    }

    /// Returns the runtime calls are spawned onto.
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Fetch the service status in the background.
    pub fn fetch_status(&self) {
        let this = self.clone();
        self.runtime.spawn(async move {
            let result = this.backend.status().await;
            this.emit(ApiEvent::Status(result));
        });
    }

    /// Fetch the run history in the background.
    pub fn fetch_history(&self) {
        let this = self.clone();
        self.runtime.spawn(async move { this.refresh_history().await });
    }

    /// Submit a quiz job in the background.
    pub fn submit(&self, request: QuizRequest) {
        let this = self.clone();
        self.runtime.spawn(async move {
            let result = this.backend.submit(&request).await;
            this.emit(ApiEvent::Submitted(result));
        });
    }

    /// Fetch the run history and emit the result, tagged with a fresh token.
    ///
    /// The token is taken before the request goes out, so a response to an
    /// older request always carries a smaller token than a newer one.
    pub async fn refresh_history(&self) {
        let token = self.history_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.backend.history().await;
        self.emit(ApiEvent::History { token, result });
    }

    fn emit(&self, event: ApiEvent) {
        // The receiver is gone once the TUI has shut down; late completions are dropped.
        if self.events.send(event).is_err() {
            tracing::debug!("dropping backend completion after shutdown");
        }
    }
}
