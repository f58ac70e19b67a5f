//! Sleep chart widget for the viewed month.
//!
//! Plots the month's recorded sleep durations as a bar per day. Days with
//! no entry are simply absent from the plot; the panel title shows the
//! selected day's value or the in-progress edit buffer.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
};

use crate::data::{HabitStore, dates};

use super::theme::Theme;

/// Sleep panel showing the month's values and the selected day's entry
pub struct SleepPanel<'a> {
    year: i32,
    month: u32,
    selected_day: u32,
    habits: &'a HabitStore,
    /// In-progress hours text while the user is editing
    editing: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SleepPanel<'a> {
    pub fn new(
        year: i32,
        month: u32,
        selected_day: u32,
        habits: &'a HabitStore,
        editing: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        SleepPanel {
            year,
            month,
            selected_day,
            habits,
            editing,
            theme,
        }
    }

    fn title(&self) -> String {
        let key = dates::day_key(self.year, self.month, self.selected_day);
        if let Some(buffer) = self.editing {
            return format!(" Sleep — hours: {buffer}_ ");
        }
        match self.habits.sleep_hours(&key) {
            Some(hours) => format!(" Sleep — {hours:.1} h on {key} "),
            None => format!(" Sleep — no entry for {key} "),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let days = dates::days_in_month(self.year, self.month);
        let points: Vec<(f64, f64)> = (1..=days)
            .filter_map(|day| {
                let key = dates::day_key(self.year, self.month, day);
                self.habits
                    .sleep_hours(&key)
                    .map(|hours| (day as f64, hours))
            })
            .collect();

        if points.is_empty() {
            self.render_empty(frame, area, focused);
            return;
        }

        // Y axis always spans the valid range so bars are comparable
        // between months
        let y_max = points
            .iter()
            .map(|(_, y)| *y)
            .fold(8.0_f64, f64::max)
            .min(24.0);

        let datasets = vec![
            Dataset::default()
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(self.theme.sleep_bar))
                .data(&points),
        ];

        let x_labels = vec![
            Span::raw("1"),
            Span::raw(format!("{}", days / 2)),
            Span::raw(format!("{days}")),
        ];
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_max / 2.0)),
            Span::raw(format!("{y_max:.0}")),
        ];

        let (border_style, title_style) = self.theme.panel_styles(focused);
        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(self.title(), title_style))
                    .borders(Borders::ALL)
                    .border_type(if focused {
                        BorderType::Double
                    } else {
                        BorderType::Plain
                    })
                    .border_style(border_style),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        "day",
                        Style::default().add_modifier(Modifier::DIM),
                    ))
                    .style(self.theme.normal_style())
                    .bounds([1.0, days as f64])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "hours",
                        Style::default().add_modifier(Modifier::DIM),
                    ))
                    .style(self.theme.normal_style())
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (border_style, title_style) = self.theme.panel_styles(focused);
        let paragraph = Paragraph::new(Span::styled(
            "No sleep recorded this month. Press e to log hours.",
            self.theme.dimmed_title_style(),
        ))
        .block(
            Block::default()
                .title(Span::styled(self.title(), title_style))
                .borders(Borders::ALL)
                .border_type(if focused {
                    BorderType::Double
                } else {
                    BorderType::Plain
                })
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}
