//! Live log panel.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Pane};

/// Render the activity log, newest line at the top.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Logs;

    let title = Line::from(vec![
        Span::styled(" Live Logs ", app.theme.header),
        Span::styled("● ", Style::default().fg(app.theme.success)),
        Span::styled(
            format!("{} ", app.logs.len()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.pane_border(focused));

    if app.logs.is_empty() {
        let waiting = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Waiting for logs...",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(waiting, area);
        return;
    }

    let lines: Vec<Line> = app
        .logs
        .lines()
        .skip(app.log_scroll)
        .map(|l| Line::from(l.to_string()))
        .collect();

    let paragraph = Paragraph::new(lines).style(app.theme.log).block(block);
    frame.render_widget(paragraph, area);
}
