//! Terminal UI rendering using ratatui.
//!
//! Each pane is implemented in its own submodule with a `render` function;
//! [`render`] composes them into the full dashboard.
//!
//! ## Submodules
//!
//! - [`stats`]: Total / successful / failed / average-time tiles
//! - [`form`]: Quiz submission form with error and success panels
//! - [`logs`]: Newest-first activity log
//! - [`history`]: Run history list
//! - [`detail`]: Modal overlay showing one history entry in full
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header (common::render_header)               │
//! ├───────────┬───────────┬──────────┬───────────┤
//! │ Total     │ Success   │ Failed   │ Avg Time  │
//! ├───────────┴───────────┼──────────┴───────────┤
//! │ Submit form           │                      │
//! │ (form::render)        │ History              │
//! ├───────────────────────┤ (history::render)    │
//! │ Live logs             │                      │
//! │ (logs::render)        │                      │
//! ├───────────────────────┴──────────────────────┤
//! │ Status Bar (common::render_status_bar)       │
//! └──────────────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod form;
pub mod history;
pub mod logs;
pub mod stats;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 80;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 24;

/// Draw the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let rows = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(3), // Stat tiles
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, rows[0]);
    stats::render(frame, app, rows[1]);

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    let left = Layout::vertical([
        Constraint::Length(form::height(app, columns[0].width)), // Form
        Constraint::Min(4),                                      // Logs
    ])
    .split(columns[0]);

    form::render(frame, app, left[0]);
    logs::render(frame, app, left[1]);
    history::render(frame, app, columns[1]);

    common::render_status_bar(frame, app, rows[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use tokio::runtime::Handle;

    use super::*;
    use crate::app::Pane;
    use crate::backend::dispatch::testing::FakeBackend;
    use crate::backend::{ApiError, ApiEvent, HistoryEntry, JobResult, RunStatus, ServiceStatus};
    use crate::config::Settings;

    fn app() -> App {
        App::new(Arc::new(FakeBackend::default()), Handle::current(), &Settings::default())
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn job(status: &str) -> JobResult {
        JobResult {
            status: status.to_string(),
            time_taken: 1.23,
            final_answer: serde_json::json!({"answer": 42}),
            steps: vec![serde_json::json!({"step": "load"}), serde_json::json!({"step": "submit"})],
            final_url: None,
            quizzes_solved: None,
            chain_complete: None,
            message: None,
        }
    }

    fn entry(email: &str, status: RunStatus, time_taken: f64, error: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2025-11-02T10:00:00".to_string(),
            email: email.to_string(),
            initial_url: "https://example.com/quiz-1".to_string(),
            final_url: Some("https://example.com/quiz-3".to_string()),
            status,
            time_taken,
            quiz_count: Some(3),
            error: error.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_initial_screen() {
        let app = app();
        let text = draw(&app, 120, 40);
        assert!(text.contains("Connecting..."));
        assert!(text.contains("No quiz history yet"));
        assert!(text.contains("Waiting for logs..."));
        assert!(text.contains("Total Quizzes"));
        assert!(text.contains("0.0s"));
        assert!(text.contains("[ Submit Quiz ]"));
    }

    #[tokio::test]
    async fn test_header_shows_service_status() {
        let mut app = app();
        app.apply(ApiEvent::Status(Ok(ServiceStatus {
            service: "LLM Analysis Quiz Bot".to_string(),
            status: "running".to_string(),
            version: "1.0.0".to_string(),
        })));
        let text = draw(&app, 120, 40);
        assert!(text.contains("LLM Analysis Quiz Bot"));
        assert!(text.contains("running"));
        assert!(text.contains("v1.0.0"));
    }

    #[tokio::test]
    async fn test_success_panel() {
        let mut app = app();
        app.apply(ApiEvent::Submitted(Ok(job("ok"))));
        let text = draw(&app, 120, 40);
        assert!(text.contains("Quiz completed successfully!"));
        assert!(text.contains("Time: 1.23s"));
        assert!(text.contains(r#"Answer: {"answer":42}"#));
        assert!(text.contains("Steps: 2"));
    }

    #[tokio::test]
    async fn test_success_panel_fits_long_answer() {
        let mut app = app();
        let mut result = job("ok");
        result.final_answer = serde_json::json!("x".repeat(300));
        result.message = Some("Chain finished after three quizzes".to_string());
        app.apply(ApiEvent::Submitted(Ok(result)));

        let text = draw(&app, 120, 40);
        assert!(text.contains("Steps: 2"));
        assert!(text.contains("Chain finished after three quizzes"));
        assert!(text.contains("Live Logs"));
    }

    #[tokio::test]
    async fn test_no_success_panel_for_non_ok_status() {
        let mut app = app();
        app.apply(ApiEvent::Submitted(Ok(job("error"))));
        let text = draw(&app, 120, 40);
        assert!(!text.contains("Quiz completed successfully!"));
    }

    #[tokio::test]
    async fn test_error_panel_shows_detail() {
        let mut app = app();
        app.apply(ApiEvent::Submitted(Err(ApiError::Backend {
            status: 403,
            detail: "invalid secret".to_string(),
        })));
        let text = draw(&app, 120, 40);
        assert!(text.contains(" invalid secret"));
        assert!(text.contains("Error: invalid secret"));
    }

    #[tokio::test]
    async fn test_processing_label_while_loading() {
        let mut app = app();
        app.loading = true;
        let text = draw(&app, 120, 40);
        assert!(text.contains("Processing..."));
        assert!(!text.contains("[ Submit Quiz ]"));
    }

    #[tokio::test]
    async fn test_secret_is_masked() {
        let mut app = app();
        app.form.secret = "hunter2".to_string();
        let text = draw(&app, 120, 40);
        assert!(!text.contains("hunter2"));
        assert!(text.contains("•••••••"));
    }

    #[tokio::test]
    async fn test_history_and_stats() {
        let mut app = app();
        app.apply(ApiEvent::History {
            token: 1,
            result: Ok(vec![
                entry("a@example.com", RunStatus::Success, 4.0, None),
                entry("b@example.com", RunStatus::Failed, 2.0, Some("Timeout exceeded")),
            ]),
        });
        let text = draw(&app, 120, 40);
        assert!(text.contains("✓ Success"));
        assert!(text.contains("✗ Failed"));
        assert!(text.contains("a@example.com"));
        assert!(text.contains("Timeout exceeded"));
        assert!(text.contains("3 quizzes"));
        assert!(text.contains("4.00s"));
        assert!(text.contains("3.0s"));
        assert!(text.contains("[1/2]"));
    }

    #[tokio::test]
    async fn test_detail_overlay() {
        let mut app = app();
        app.apply(ApiEvent::History {
            token: 1,
            result: Ok(vec![entry("a@example.com", RunStatus::Failed, 2.0, Some("boom"))]),
        });
        app.set_pane(Pane::History);
        app.enter_detail();
        let text = draw(&app, 120, 40);
        assert!(text.contains("Run Detail"));
        assert!(text.contains("https://example.com/quiz-3"));
        assert!(text.contains("Press Esc to close"));
    }

    #[tokio::test]
    async fn test_help_overlay() {
        let mut app = app();
        app.toggle_help();
        let text = draw(&app, 120, 40);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("(outside the form)"));
    }

    #[tokio::test]
    async fn test_terminal_too_small() {
        let app = app();
        let text = draw(&app, 40, 10);
        assert!(text.contains("Terminal too small"));
    }
}
