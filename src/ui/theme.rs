//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::backend::RunStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and the focused pane.
    pub highlight: Color,
    /// Color for successful runs and the success panel.
    pub success: Color,
    /// Color for failed runs and the error panel.
    pub failure: Color,
    /// Color for in-progress indicators.
    pub pending: Color,
    /// Color for borders of unfocused panes.
    pub border: Color,
    /// Style for pane titles and table headers.
    pub header: Style,
    /// Style for the selected history row.
    pub selected: Style,
    /// Style for the log panel body.
    pub log: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            success: Color::Green,
            failure: Color::Red,
            pending: Color::Yellow,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            log: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            success: Color::Green,
            failure: Color::Red,
            pending: Color::Magenta,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            log: Style::default().fg(Color::Black),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a run status badge
    pub fn status_style(&self, status: RunStatus) -> Style {
        match status {
            RunStatus::Success => Style::default().fg(self.success),
            RunStatus::Failed | RunStatus::Other => {
                Style::default().fg(self.failure).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Border style for a pane, depending on whether it has focus.
    pub fn pane_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }
}
