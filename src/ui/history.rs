//! Run history list rendering.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Pane};
use crate::data::duration::format_secs;
use crate::data::history::{local_timestamp, quiz_count_label};

/// Render the history list in the order the backend returned it.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::History;
    let entries = app.history.entries();

    // Show scroll position if there are items
    let position_info = if !entries.is_empty() {
        format!(" [{}/{}]", app.selected_history_index + 1, entries.len())
    } else {
        String::new()
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" Quiz History{} [r:refresh] ", position_info),
            app.theme.header,
        ))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.pane_border(focused));

    if entries.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No quiz history yet"),
            Line::from(Span::styled(
                "Submit a quiz to see results here",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(entry.status.badge(), app.theme.status_style(entry.status)),
                    Span::raw("  "),
                    Span::styled(local_timestamp(&entry.timestamp), dim),
                ]),
                Line::from(Span::styled(
                    entry.email.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(entry.initial_url.clone()),
            ];

            let mut meta = vec![Span::styled(format_secs(entry.time_taken), dim)];
            if let Some(label) = quiz_count_label(entry.quiz_count) {
                meta.push(Span::styled(format!(" · {}", label), dim));
            }
            lines.push(Line::from(meta));

            if let Some(ref error) = entry.error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(app.theme.failure),
                )));
            }

            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { app.theme.selected } else { Style::default() })
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_history_index.min(entries.len() - 1)));

    frame.render_stateful_widget(list, area, &mut state);
}
