//! Theme configuration for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub border: Color,
    pub title: Color,
    pub habit_done: Color,
    pub habit_pending: Color,
    pub journal_marker: Color,
    pub sleep_bar: Color,
    pub quote: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bg: Color::Reset,
            fg: Color::White,
            highlight_bg: Color::Rgb(60, 60, 80),
            highlight_fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            habit_done: Color::Green,
            habit_pending: Color::DarkGray,
            journal_marker: Color::Yellow,
            sleep_bar: Color::Blue,
            quote: Color::Magenta,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Convenience helper returning (border_style, title_style) for focus state
    pub fn panel_styles(&self, focused: bool) -> (Style, Style) {
        if focused {
            (self.focused_border_style(), self.focused_border_style())
        } else {
            (self.border_style(), self.dimmed_title_style())
        }
    }

    /// Get style for normal text
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for focused panel borders (distinct from normal borders)
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Get style for unfocused/dimmed titles
    pub fn dimmed_title_style(&self) -> Style {
        Style::default().fg(self.border).add_modifier(Modifier::DIM)
    }

    /// Style for a completed habit mark
    pub fn done_style(&self) -> Style {
        Style::default().fg(self.habit_done)
    }

    /// Style for a pending habit mark
    pub fn pending_style(&self) -> Style {
        Style::default().fg(self.habit_pending)
    }

    /// Style for the journal-entry marker in the calendar
    pub fn journal_marker_style(&self) -> Style {
        Style::default().fg(self.journal_marker)
    }

    /// Style for the daily quote banner
    pub fn quote_style(&self) -> Style {
        Style::default().fg(self.quote).add_modifier(Modifier::ITALIC)
    }

    /// Style for non-fatal error messages in the status bar
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_and_pending_styles_are_distinct() {
        let theme = Theme::default();
        assert_ne!(theme.done_style(), theme.pending_style());
    }

    #[test]
    fn test_focused_border_differs_from_normal() {
        let theme = Theme::default();
        assert_ne!(theme.focused_border_style(), theme.border_style());
    }
}
