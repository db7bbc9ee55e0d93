//! Quiz submission form rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Pane};
use crate::data::duration::format_secs;
use crate::data::FormField;

/// Render the submission form with its error or success panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Form;

    let block = Block::default()
        .title(Span::styled(" Submit Quiz ", app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.pane_border(focused));

    let paragraph = Paragraph::new(lines(app)).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Rows the form needs at `width`, borders included.
///
/// Each wrapped line gets one spare row, since word wrapping can start a
/// long token on a fresh row.
pub fn height(app: &App, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2).max(1));
    let rows: usize = lines(app)
        .iter()
        .map(|line| {
            let w = line.width();
            if w <= inner {
                1
            } else {
                w.div_ceil(inner) + 1
            }
        })
        .sum();
    u16::try_from(rows + 2).unwrap_or(u16::MAX)
}

fn lines(app: &App) -> Vec<Line<'static>> {
    let focused = app.focus == Pane::Form;
    let mut lines: Vec<Line<'static>> = Vec::new();

    for field in FormField::ALL {
        lines.push(field_line(app, field, focused));
    }
    lines.push(Line::from(""));
    lines.push(submit_line(app));

    if let Some(ref error) = app.form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.failure),
        )));
    } else if let Some(result) = app.form.success() {
        let panel = Style::default().fg(app.theme.success);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Quiz completed successfully!",
            panel.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(" Time: {}", format_secs(result.time_taken)),
            panel,
        )));
        lines.push(Line::from(Span::styled(
            format!(" Answer: {}", result.answer_json()),
            panel,
        )));
        lines.push(Line::from(Span::styled(
            format!(" Steps: {}", result.steps.len()),
            panel,
        )));
        if let Some(ref message) = result.message {
            lines.push(Line::from(Span::styled(format!(" {}", message), panel)));
        }
    }

    lines
}

fn field_line(app: &App, field: FormField, pane_focused: bool) -> Line<'static> {
    let active = pane_focused && app.form.focused == field;
    let value = app.form.value(field);

    let marker = if active { "▶ " } else { "  " };
    let label = Span::styled(
        format!("{}{:<11}", marker, format!("{}:", field.label())),
        if active {
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        },
    );

    let content = if value.is_empty() {
        Span::styled(
            field.placeholder().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )
    } else if field == FormField::Secret {
        Span::raw("•".repeat(value.chars().count()))
    } else {
        Span::raw(value.to_string())
    };

    let mut spans = vec![label, Span::raw(" "), content];
    if active {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}

fn submit_line(app: &App) -> Line<'static> {
    if app.loading {
        Line::from(Span::styled(
            "  [ Processing... ]",
            Style::default().fg(app.theme.pending).add_modifier(Modifier::DIM),
        ))
    } else {
        Line::from(Span::styled(
            "  [ Submit Quiz ]",
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        ))
    }
}
