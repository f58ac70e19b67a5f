//! Month-grid calendar widget.
//!
//! Renders the viewed month as a Monday-first grid. Day numbers are colored
//! by habit completion for that day, a dot marks days with a journal entry,
//! and the selected day is highlighted.

use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::data::{HabitStore, dates};

use super::theme::Theme;

const WEEKDAY_HEADER: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

/// Calendar panel for the viewed month
pub struct CalendarPanel<'a> {
    year: i32,
    month: u32,
    selected_day: u32,
    habits: &'a HabitStore,
    theme: &'a Theme,
}

impl<'a> CalendarPanel<'a> {
    pub fn new(
        year: i32,
        month: u32,
        selected_day: u32,
        habits: &'a HabitStore,
        theme: &'a Theme,
    ) -> Self {
        CalendarPanel {
            year,
            month,
            selected_day,
            habits,
            theme,
        }
    }

    fn day_cell(&self, day: u32) -> Vec<Span<'static>> {
        let key = dates::day_key(self.year, self.month, day);
        let done = self.habits.habits_done_on(&key);
        let total = self.habits.habit_list().len();
        let has_journal = self
            .habits
            .journal_entry(&key)
            .is_some_and(|text| !text.is_empty());

        let number_style = if day == self.selected_day {
            self.theme.highlight_style()
        } else if total > 0 && done == total {
            self.theme.done_style()
        } else if done > 0 {
            self.theme.title_style()
        } else {
            self.theme.normal_style()
        };

        let marker = if has_journal { "•" } else { " " };
        vec![
            Span::styled(format!("{day:>3}"), number_style),
            Span::styled(marker.to_string(), self.theme.journal_marker_style()),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let days = dates::days_in_month(self.year, self.month);
        let first_weekday = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday().num_days_from_monday())
            .unwrap_or(0);

        let mut lines = vec![Line::from(Span::styled(
            WEEKDAY_HEADER,
            self.theme.dimmed_title_style(),
        ))];

        let mut spans: Vec<Span> = Vec::new();
        for _ in 0..first_weekday {
            spans.push(Span::raw("    "));
        }
        for day in 1..=days {
            spans.extend(self.day_cell(day));
            if (first_weekday + day) % 7 == 0 {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }

        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} {} ", dates::month_name(self.month), self.year),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style);

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }
}
