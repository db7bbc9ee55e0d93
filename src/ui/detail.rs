//! Detail overlay rendering.
//!
//! Displays a modal overlay with every field of the selected history entry.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_secs;
use crate::data::history::local_timestamp;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the selected history entry as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(entry) = app.selected_entry() else {
        return;
    };

    // Width: 80% of screen, clamped to [MIN_OVERLAY_WIDTH, 100]
    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 100);
    // Height: 60% of screen, clamped to [MIN_OVERLAY_HEIGHT, 24]
    let overlay_height = (area.height * 60 / 100).clamp(MIN_OVERLAY_HEIGHT, 24);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Fields
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::raw(format!(" {:<13}", name)), Span::styled(value, bold)])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(" Status       "),
            Span::styled(entry.status.badge(), app.theme.status_style(entry.status)),
        ]),
        field("Timestamp", local_timestamp(&entry.timestamp)),
        field("Email", entry.email.clone()),
        field("Initial URL", entry.initial_url.clone()),
        field("Final URL", entry.final_url.clone().unwrap_or_else(|| "-".to_string())),
        field("Time taken", format_secs(entry.time_taken)),
        field(
            "Quizzes",
            entry.quiz_count.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
        ),
    ];

    if let Some(ref error) = entry.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Error", bold)));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.failure),
        )));
    }

    let block = Block::default()
        .title(" Run Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
