//! Profile overlay showing the user's identity and notification switches.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::data::UserProfile;

use super::help::centered_rect;
use super::theme::Theme;

/// Profile overlay with notification toggles and logout
pub struct ProfileOverlay<'a> {
    user: &'a UserProfile,
    theme: &'a Theme,
}

impl<'a> ProfileOverlay<'a> {
    pub fn new(user: &'a UserProfile, theme: &'a Theme) -> Self {
        ProfileOverlay { user, theme }
    }

    fn toggle_line(&self, key: char, label: &str, on: bool) -> Line<'static> {
        let (mark, style) = if on {
            ("on ", self.theme.done_style())
        } else {
            ("off", self.theme.pending_style())
        };
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("[{key}] "), self.theme.title_style()),
            Span::raw(format!("{label:<18}")),
            Span::styled(mark.to_string(), style),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 60, area);
        frame.render_widget(Clear, popup_area);

        let avatar = match &self.user.avatar_url {
            Some(_) => "set",
            None => "not set",
        };

        let prefs = self.user.notifications;
        let lines = vec![
            Line::from(""),
            Line::from(format!("    Name       {}", self.user.full_name)),
            Line::from(format!("    Email      {}", self.user.email)),
            Line::from(format!("    Time zone  {}", self.user.time_zone)),
            Line::from(format!("    Avatar     {avatar}")),
            Line::from(""),
            Line::from(Span::styled(
                "    Notifications",
                self.theme.dimmed_title_style(),
            )),
            self.toggle_line('1', "Daily reminder", prefs.daily_reminder),
            self.toggle_line('2', "Weekly summary", prefs.weekly_summary),
            self.toggle_line('3', "Journal prompt", prefs.journal_prompt),
            Line::from(""),
            Line::from(vec![
                Span::raw("    "),
                Span::styled("[L] ", self.theme.error_style()),
                Span::raw("Log out and erase all tracked data"),
            ]),
            Line::from(vec![
                Span::raw("    "),
                Span::styled("[Esc] ", self.theme.title_style()),
                Span::raw("Close"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Profile ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style())
                    .title_style(self.theme.title_style())
                    .style(self.theme.normal_style()),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false })
            .style(self.theme.normal_style());

        frame.render_widget(paragraph, popup_area);
    }
}
