//! Aggregate stat tiles.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the four stat tiles: total, successful, failed, average time.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();

    let tiles: [(&str, String, Color); 4] = [
        ("Total Quizzes", stats.total.to_string(), app.theme.highlight),
        ("Successful", stats.success.to_string(), app.theme.success),
        ("Failed", stats.failed.to_string(), app.theme.failure),
        ("Avg Time", format!("{:.1}s", stats.avg_time), app.theme.pending),
    ];

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for ((title, value, color), column) in tiles.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));

        let paragraph = Paragraph::new(value)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(block);

        frame.render_widget(paragraph, *column);
    }
}
