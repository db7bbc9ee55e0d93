//! Application state and interaction logic.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::backend::{
    ApiEvent, Dispatcher, HistoryEntry, PollHandle, Poller, QuizBackend, ServiceStatus,
};
use crate::config::Settings;
use crate::data::{DerivedStats, History, LogBuffer, QuizForm};
use crate::ui::Theme;

/// The pane that currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Quiz submission form. Keystrokes are typed into the focused field.
    Form,
    /// Activity log.
    Logs,
    /// Run history list.
    History,
}

impl Pane {
    /// Cycle to the next pane.
    pub fn next(self) -> Self {
        match self {
            Pane::Form => Pane::Logs,
            Pane::Logs => Pane::History,
            Pane::History => Pane::Form,
        }
    }

    /// Cycle to the previous pane.
    pub fn prev(self) -> Self {
        match self {
            Pane::Form => Pane::History,
            Pane::Logs => Pane::Form,
            Pane::History => Pane::Logs,
        }
    }

    /// Returns the display label for this pane.
    pub fn label(&self) -> &'static str {
        match self {
            Pane::Form => "Submit",
            Pane::Logs => "Logs",
            Pane::History => "History",
        }
    }
}

/// Main application state.
///
/// Owns everything the dashboard shows. Backend completions arrive as
/// [`ApiEvent`]s and are applied on the UI thread by [`App::apply`].
pub struct App {
    pub running: bool,
    pub focus: Pane,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Backend access
    dispatcher: Dispatcher,
    events: mpsc::UnboundedReceiver<ApiEvent>,
    poller: Option<PollHandle>,
    poll_interval: Duration,

    // Backend-derived state
    pub service_status: Option<ServiceStatus>,
    pub history: History,

    // Client-side state
    pub logs: LogBuffer,
    pub form: QuizForm,
    /// A submission is in flight.
    pub loading: bool,

    // Navigation state
    pub selected_history_index: usize,
    pub log_scroll: usize,

    pub export_path: std::path::PathBuf,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App talking to `backend`, spawning calls onto `runtime`.
    pub fn new(backend: Arc<dyn QuizBackend>, runtime: Handle, settings: &Settings) -> Self {
        let (dispatcher, events) = Dispatcher::new(backend, runtime);
        Self {
            running: true,
            focus: Pane::Form,
            show_help: false,
            show_detail_overlay: false,
            dispatcher,
            events,
            poller: None,
            poll_interval: settings.poll_interval,
            service_status: None,
            history: History::new(),
            logs: LogBuffer::new(),
            form: QuizForm::new(),
            loading: false,
            selected_history_index: 0,
            log_scroll: 0,
            export_path: settings.export_path.clone(),
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Use the given theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Fetch the service status once and start the history poll loop.
    ///
    /// The poll loop fetches history immediately, then once per interval
    /// until [`App::shutdown`] or drop.
    pub fn start(&mut self) {
        self.dispatcher.fetch_status();
        self.poller = Some(Poller::start(self.dispatcher.clone(), self.poll_interval));
        tracing::info!(
            backend = self.dispatcher.description(),
            interval_secs = self.poll_interval.as_secs_f64(),
            "dashboard started"
        );
    }

    /// Stop the poll loop. No further polls are issued afterwards.
    pub fn shutdown(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }

    /// Whether the poll loop is active.
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollHandle::is_running)
    }

    /// Returns a description of the backend.
    pub fn backend_description(&self) -> &str {
        self.dispatcher.description()
    }

    /// Apply every completion that has arrived since the last call.
    ///
    /// Returns the number of events applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Apply a single backend completion to the state.
    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Status(Ok(status)) => {
                self.service_status = Some(status);
            }
            ApiEvent::Status(Err(e)) => {
                tracing::warn!(error = %e, "failed to fetch status");
            }
            ApiEvent::History { token, result: Ok(entries) } => {
                if self.history.commit(token, entries) {
                    self.clamp_selection();
                } else {
                    tracing::debug!(
                        token,
                        committed = self.history.committed_token(),
                        "dropping stale history response"
                    );
                }
            }
            ApiEvent::History { token, result: Err(e) } => {
                tracing::warn!(token, error = %e, "failed to fetch history");
                self.logs.add("Error fetching history");
            }
            ApiEvent::Submitted(outcome) => {
                self.loading = false;
                match &outcome {
                    Ok(result) => {
                        tracing::info!(status = %result.status, time_taken = result.time_taken, "quiz completed");
                        self.logs.add(format!("Quiz completed: {}", result.status));
                        self.logs.add(format!("Time taken: {:.2}s", result.time_taken));
                        self.logs.add(format!("Final answer: {}", result.answer_json()));
                        self.dispatcher.fetch_history();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "quiz submission failed");
                        self.logs.add(format!("Error: {}", e));
                    }
                }
                self.form.finish(outcome);
            }
        }
    }

    /// Validate the form and submit it.
    ///
    /// Ignored while a submission is already in flight. A validation failure
    /// is shown in the form and never reaches the network.
    pub fn submit_form(&mut self) {
        if self.loading {
            return;
        }

        self.form.begin_submit();
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(message) => {
                self.form.error = Some(message);
                return;
            }
        };

        self.loading = true;
        self.logs.add(format!("Submitting quiz: {}", request.url));
        tracing::info!(email = %request.email, url = %request.url, "submitting quiz");
        self.dispatcher.submit(request);
    }

    /// Fetch history now, independent of the poll timer.
    pub fn refresh_history(&mut self) {
        self.dispatcher.fetch_history();
        self.set_status_message("Refreshing history...".to_string());
    }

    /// Aggregates over the current history.
    pub fn stats(&self) -> DerivedStats {
        DerivedStats::from_entries(self.history.entries())
    }

    /// The history entry under the cursor.
    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.history.get(self.selected_history_index)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Focus the next pane.
    pub fn next_pane(&mut self) {
        self.focus = self.focus.next();
    }

    /// Focus the previous pane.
    pub fn prev_pane(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Focus a specific pane.
    pub fn set_pane(&mut self, pane: Pane) {
        self.focus = pane;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.focus {
            Pane::History => {
                let max = self.history.len().saturating_sub(1);
                self.selected_history_index = (self.selected_history_index + n).min(max);
            }
            Pane::Logs => {
                let max = self.logs.len().saturating_sub(1);
                self.log_scroll = (self.log_scroll + n).min(max);
            }
            Pane::Form => {}
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.focus {
            Pane::History => {
                self.selected_history_index = self.selected_history_index.saturating_sub(n);
            }
            Pane::Logs => {
                self.log_scroll = self.log_scroll.saturating_sub(n);
            }
            Pane::Form => {}
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.focus {
            Pane::History => self.selected_history_index = 0,
            Pane::Logs => self.log_scroll = 0,
            Pane::Form => {}
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.focus {
            Pane::History => self.selected_history_index = self.history.len().saturating_sub(1),
            Pane::Logs => self.log_scroll = self.logs.len().saturating_sub(1),
            Pane::Form => {}
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_history_index >= self.history.len() {
            self.selected_history_index = self.history.len().saturating_sub(1);
        }
    }

    /// Open the detail overlay for the selected history entry.
    pub fn enter_detail(&mut self) {
        if self.focus == Pane::History && self.selected_entry().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then leave the current pane for History.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.focus != Pane::History {
            self.focus = Pane::History;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current history and stats to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        write_export(
            path,
            self.backend_description(),
            self.service_status.as_ref(),
            self.history.entries(),
        )
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Build the export document for a history snapshot.
pub fn export_document(
    backend: &str,
    status: Option<&ServiceStatus>,
    entries: &[HistoryEntry],
) -> serde_json::Value {
    serde_json::json!({
        "exported_at": chrono::Utc::now().to_rfc3339(),
        "backend": backend,
        "service": status,
        "stats": DerivedStats::from_entries(entries),
        "history": entries,
    })
}

/// Write the export document for a history snapshot as pretty JSON.
pub fn write_export(
    path: &Path,
    backend: &str,
    status: Option<&ServiceStatus>,
    entries: &[HistoryEntry],
) -> Result<()> {
    use std::io::Write;

    let json = serde_json::to_string_pretty(&export_document(backend, status, entries))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
