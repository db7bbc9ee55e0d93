//! Common UI components shared across panes.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Pane};

/// Render the header bar with the backend's service status.
///
/// Displays: status indicator, service name, status string, version.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref status) = app.service_status else {
        let line = Line::from(vec![
            Span::styled(
                " ● ",
                Style::default().fg(app.theme.pending),
            ),
            Span::styled("QUIZ DASHBOARD ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("│ Connecting..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let running = matches!(status.status.as_str(), "running" | "ok" | "healthy");
    let indicator_style = if running {
        Style::default().fg(app.theme.success)
    } else {
        Style::default().fg(app.theme.pending)
    };

    let line = Line::from(vec![
        Span::styled(" ● ", indicator_style),
        Span::styled(
            format!("{} ", status.service),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(status.status.clone(), indicator_style),
        Span::raw(" │ "),
        Span::styled(
            format!("v{}", status.version),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: focused pane, time since last history update, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match app.history.last_updated {
        Some(at) => format!("History {:.0}s ago", at.elapsed().as_secs_f64()),
        None => "History pending".to_string(),
    };

    // Context-sensitive controls
    let controls = match app.focus {
        Pane::Form => "Type to edit | ↑↓:field Enter:submit Esc:leave",
        Pane::Logs => "↑↓:scroll Tab:switch r:refresh ?:help q:quit",
        Pane::History => "↑↓:select Enter:detail Tab:switch r:refresh e:export ?:help q:quit",
    };

    let status = format!(
        " {} | {} | {} | {}",
        app.focus.label(),
        app.backend_description(),
        updated,
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Panes",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/S-Tab   Switch pane"),
        Line::from("  1 2 3 / i   Form, Logs, History"),
        Line::from("              (outside the form)"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Run detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Submit form",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ Tab     Previous/next field"),
        Line::from("  Enter       Submit quiz"),
        Line::from("  Ctrl+U      Clear field"),
        Line::from("  Esc         Leave form"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh history"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 30u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
