//! UI widgets for the habit tracker dashboard.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::data::{HabitStore, MonthlyStats, Quote};

use super::theme::Theme;

/// Header banner showing the app title and the quote of the day
pub struct QuoteBanner<'a> {
    quote: &'a Quote,
    month_title: &'a str,
    theme: &'a Theme,
}

impl<'a> QuoteBanner<'a> {
    pub fn new(quote: &'a Quote, month_title: &'a str, theme: &'a Theme) -> Self {
        QuoteBanner {
            quote,
            month_title,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let quote_line = match self.quote.author {
            Some(author) => format!("\u{201c}{}\u{201d} — {author}", self.quote.text),
            None => format!("\u{201c}{}\u{201d}", self.quote.text),
        };

        let lines = vec![
            Line::from(Span::styled(
                format!(" Habit Tracker — {}", self.month_title),
                self.theme.title_style(),
            )),
            Line::from(Span::styled(
                format!(" {quote_line}"),
                self.theme.quote_style(),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::BOTTOM))
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }
}

/// Checklist of habits for the selected day
pub struct HabitChecklist<'a> {
    habits: &'a HabitStore,
    date_key: &'a str,
    selected: usize,
    /// In-progress name when the user is adding a habit
    adding: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> HabitChecklist<'a> {
    pub fn new(
        habits: &'a HabitStore,
        date_key: &'a str,
        selected: usize,
        adding: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        HabitChecklist {
            habits,
            date_key,
            selected,
            adding,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let mut items: Vec<ListItem> = self
            .habits
            .habit_list()
            .iter()
            .map(|habit| {
                let done = self.habits.is_habit_done(self.date_key, habit);
                let (mark, style) = if done {
                    ("[x]", self.theme.done_style())
                } else {
                    ("[ ]", self.theme.pending_style())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{mark} "), style),
                    Span::styled(habit.clone(), self.theme.normal_style()),
                ]))
            })
            .collect();

        if let Some(buffer) = self.adding {
            items.push(ListItem::new(Line::from(Span::styled(
                format!(" +  {buffer}_"),
                self.theme.title_style(),
            ))));
        }

        let done = self.habits.habits_done_on(self.date_key);
        let total = self.habits.habit_list().len();
        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(Span::styled(
                format!(" Habits {done}/{total} "),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style);

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if focused && self.adding.is_none() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Journal entry panel for the selected day
pub struct JournalPanel<'a> {
    entry: Option<&'a str>,
    /// Edit buffer while the user is typing; rendered instead of the entry
    editing: Option<&'a str>,
    date_key: &'a str,
    theme: &'a Theme,
}

impl<'a> JournalPanel<'a> {
    pub fn new(
        entry: Option<&'a str>,
        editing: Option<&'a str>,
        date_key: &'a str,
        theme: &'a Theme,
    ) -> Self {
        JournalPanel {
            entry,
            editing,
            date_key,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (text, style) = match (self.editing, self.entry) {
            (Some(buffer), _) => (format!("{buffer}_"), self.theme.normal_style()),
            (None, Some(entry)) if !entry.is_empty() => {
                (entry.to_string(), self.theme.normal_style())
            }
            _ => (
                "No entry yet. Press e to write.".to_string(),
                self.theme.dimmed_title_style(),
            ),
        };

        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(Span::styled(
                format!(" Journal — {} ", self.date_key),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style);

        let paragraph = Paragraph::new(Span::styled(text, style))
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }
}

/// Monthly statistics panel
pub struct StatsPanel<'a> {
    stats: &'a MonthlyStats,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: &'a MonthlyStats, theme: &'a Theme) -> Self {
        StatsPanel { stats, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let completion = if self.stats.total_habits > 0 {
            (self.stats.completed_habits as f64 / self.stats.total_habits as f64) * 100.0
        } else {
            0.0
        };

        let lines = vec![
            Line::from(format!(
                "Habits   {}/{} ({completion:.0}%)",
                self.stats.completed_habits, self.stats.total_habits
            )),
            Line::from(format!("Sleep    {:.1} h avg", self.stats.average_sleep)),
            Line::from(format!("Journal  {} days", self.stats.journal_days)),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(" This Month ", self.theme.dimmed_title_style()))
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );

        frame.render_widget(paragraph, area);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    user_name: &'a str,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(user_name: &'a str, error: Option<&'a str>, theme: &'a Theme) -> Self {
        StatusBar {
            user_name,
            error,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = if let Some(e) = self.error {
            (format!("Error: {e}"), self.theme.error_style())
        } else {
            (
                format!(
                    "{} | [Tab] Panels [Space] Toggle [e] Edit [p] Profile [?] Help [q] Quit",
                    self.user_name
                ),
                self.theme.normal_style(),
            )
        };

        let paragraph = Paragraph::new(Span::styled(text, style))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
