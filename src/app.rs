//! Main application logic and TUI event loop.

use std::io;

use anyhow::{Context, Result};
use chrono::Datelike;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};

use crate::cli::AppConfig;
use crate::data::{
    HabitStore, NotificationPreferences, ProfileUpdate, SLEEP_RANGE, Storage, UserStore, dates,
    quote_for_date,
};
use crate::ui::{
    HelpOverlay, ProfileOverlay, Theme,
    calendar::CalendarPanel,
    sleep::SleepPanel,
    widgets::{HabitChecklist, JournalPanel, QuoteBanner, StatsPanel, StatusBar},
};

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Calendar,
    Habits,
    Journal,
    Sleep,
}

impl FocusedPanel {
    fn next(self) -> Self {
        match self {
            FocusedPanel::Calendar => FocusedPanel::Habits,
            FocusedPanel::Habits => FocusedPanel::Journal,
            FocusedPanel::Journal => FocusedPanel::Sleep,
            FocusedPanel::Sleep => FocusedPanel::Calendar,
        }
    }

    fn prev(self) -> Self {
        match self {
            FocusedPanel::Calendar => FocusedPanel::Sleep,
            FocusedPanel::Habits => FocusedPanel::Calendar,
            FocusedPanel::Journal => FocusedPanel::Habits,
            FocusedPanel::Sleep => FocusedPanel::Journal,
        }
    }
}

/// Active text-entry state, if any
enum InputMode {
    Normal,
    AddingHabit(String),
    EditingJournal(String),
    EditingSleep(String),
}

/// Application state
pub struct App {
    theme: Theme,

    // Stores, constructed once per session; the presentation layer holds
    // them by reference and owns no domain state itself
    habits: HabitStore,
    users: UserStore,

    // Viewed month and selection
    viewed_year: i32,
    viewed_month: u32,
    selected_day: u32,
    selected_habit: usize,

    // UI state
    focused: FocusedPanel,
    input: InputMode,
    show_help: bool,
    show_profile: bool,

    // Exit flag
    should_quit: bool,

    // Error message to display (non-fatal)
    error_message: Option<String>,
}

impl App {
    /// Create a new App instance, loading both stores from storage
    pub fn new(config: AppConfig) -> Self {
        let storage = Storage::new(config.data_dir.clone());
        let habits = HabitStore::new(storage.clone());
        let users = UserStore::new(storage);

        let today = dates::today();
        let (viewed_year, viewed_month) = match (config.year, config.month) {
            (Some(year), Some(month)) => (year, month),
            (None, Some(month)) => (today.year(), month),
            _ => (today.year(), today.month()),
        };
        let selected_day = if viewed_year == today.year() && viewed_month == today.month() {
            today.day()
        } else {
            1
        };

        App {
            theme: Theme::default(),
            habits,
            users,
            viewed_year,
            viewed_month,
            selected_day,
            selected_habit: 0,
            focused: FocusedPanel::Calendar,
            input: InputMode::Normal,
            show_help: false,
            show_profile: false,
            should_quit: false,
            error_message: None,
        }
    }

    /// Set an error message to display (non-fatal)
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Storage key of the selected day
    fn selected_key(&self) -> String {
        dates::day_key(self.viewed_year, self.viewed_month, self.selected_day)
    }

    fn next_month(&mut self) {
        if self.viewed_month == 12 {
            self.viewed_month = 1;
            self.viewed_year += 1;
        } else {
            self.viewed_month += 1;
        }
        self.clamp_selected_day();
    }

    fn prev_month(&mut self) {
        if self.viewed_month == 1 {
            self.viewed_month = 12;
            self.viewed_year -= 1;
        } else {
            self.viewed_month -= 1;
        }
        self.clamp_selected_day();
    }

    fn jump_to_today(&mut self) {
        let today = dates::today();
        self.viewed_year = today.year();
        self.viewed_month = today.month();
        self.selected_day = today.day();
    }

    fn clamp_selected_day(&mut self) {
        let days = dates::days_in_month(self.viewed_year, self.viewed_month);
        if self.selected_day > days {
            self.selected_day = days.max(1);
        }
    }

    fn clamp_selected_habit(&mut self) {
        let len = self.habits.habit_list().len();
        if self.selected_habit >= len {
            self.selected_habit = len.saturating_sub(1);
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> Result<()> {
        self.error_message = None;

        if !matches!(self.input, InputMode::Normal) {
            return self.handle_text_entry(key);
        }
        if self.show_profile {
            return self.handle_profile_keys(key);
        }

        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return Ok(());
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return Ok(());
            }
            KeyCode::Char('p') => {
                self.show_profile = true;
                return Ok(());
            }
            KeyCode::Tab => {
                self.focused = self.focused.next();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.focused = self.focused.prev();
                return Ok(());
            }
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.next_month();
                return Ok(());
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                self.prev_month();
                return Ok(());
            }
            KeyCode::Char('t') => {
                self.jump_to_today();
                return Ok(());
            }
            _ => {}
        }

        // If help is shown, don't process other keys
        if self.show_help {
            return Ok(());
        }

        match self.focused {
            FocusedPanel::Calendar => self.handle_calendar_keys(key),
            FocusedPanel::Habits => self.handle_habit_keys(key),
            FocusedPanel::Journal => self.handle_journal_keys(key),
            FocusedPanel::Sleep => self.handle_sleep_keys(key),
        }
    }

    fn handle_calendar_keys(&mut self, key: KeyCode) -> Result<()> {
        let days = dates::days_in_month(self.viewed_year, self.viewed_month);
        match key {
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_day > 1 {
                    self.selected_day -= 1;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_day < days {
                    self.selected_day += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_day = self.selected_day.saturating_sub(7).max(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_day = (self.selected_day + 7).min(days);
            }
            KeyCode::Enter => {
                self.focused = FocusedPanel::Habits;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_habit_keys(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.habits.habit_list().len();
                if len > 0 {
                    self.selected_habit = (self.selected_habit + 1) % len;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.habits.habit_list().len();
                if len > 0 {
                    self.selected_habit = self.selected_habit.checked_sub(1).unwrap_or(len - 1);
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(name) = self.habits.habit_list().get(self.selected_habit).cloned() {
                    let date_key = self.selected_key();
                    self.habits.toggle_habit(&date_key, &name)?;
                }
            }
            KeyCode::Char('a') => {
                self.input = InputMode::AddingHabit(String::new());
            }
            KeyCode::Char('d') => {
                if let Some(name) = self.habits.habit_list().get(self.selected_habit).cloned() {
                    self.habits.remove_habit(&name)?;
                    self.clamp_selected_habit();
                }
            }
            KeyCode::Esc => {
                self.focused = FocusedPanel::Calendar;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_journal_keys(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('e') | KeyCode::Enter => {
                let existing = self
                    .habits
                    .journal_entry(&self.selected_key())
                    .unwrap_or_default()
                    .to_string();
                self.input = InputMode::EditingJournal(existing);
            }
            KeyCode::Esc => {
                self.focused = FocusedPanel::Calendar;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_sleep_keys(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('e') | KeyCode::Enter => {
                let existing = self
                    .habits
                    .sleep_hours(&self.selected_key())
                    .map(|h| format!("{h}"))
                    .unwrap_or_default();
                self.input = InputMode::EditingSleep(existing);
            }
            KeyCode::Esc => {
                self.focused = FocusedPanel::Calendar;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_profile_keys(&mut self, key: KeyCode) -> Result<()> {
        let prefs = self.users.user().notifications;
        let with_prefs = |prefs: NotificationPreferences| ProfileUpdate {
            notifications: Some(prefs),
            ..Default::default()
        };

        match key {
            KeyCode::Char('1') => {
                self.users.update_user(with_prefs(NotificationPreferences {
                    daily_reminder: !prefs.daily_reminder,
                    ..prefs
                }))?;
            }
            KeyCode::Char('2') => {
                self.users.update_user(with_prefs(NotificationPreferences {
                    weekly_summary: !prefs.weekly_summary,
                    ..prefs
                }))?;
            }
            KeyCode::Char('3') => {
                self.users.update_user(with_prefs(NotificationPreferences {
                    journal_prompt: !prefs.journal_prompt,
                    ..prefs
                }))?;
            }
            KeyCode::Char('L') => {
                // Logout erases the durable copies; the live habit store is
                // reset here so memory and storage agree
                self.users.logout()?;
                self.habits.reset_to_defaults();
                self.selected_habit = 0;
                self.show_profile = false;
            }
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('q') => {
                self.show_profile = false;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_text_entry(&mut self, key: KeyCode) -> Result<()> {
        match &mut self.input {
            InputMode::Normal => Ok(()),
            InputMode::AddingHabit(buffer) => match key {
                KeyCode::Enter => {
                    let name = std::mem::take(buffer);
                    self.input = InputMode::Normal;
                    self.habits.add_habit(&name)
                }
                KeyCode::Esc => {
                    self.input = InputMode::Normal;
                    Ok(())
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    Ok(())
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    Ok(())
                }
                _ => Ok(()),
            },
            InputMode::EditingJournal(buffer) => match key {
                KeyCode::Enter => {
                    let content = std::mem::take(buffer);
                    self.input = InputMode::Normal;
                    let date_key = self.selected_key();
                    self.habits.update_journal(&date_key, &content)
                }
                KeyCode::Esc => {
                    self.input = InputMode::Normal;
                    Ok(())
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    Ok(())
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    Ok(())
                }
                _ => Ok(()),
            },
            InputMode::EditingSleep(buffer) => match key {
                KeyCode::Enter => {
                    let text = std::mem::take(buffer);
                    self.input = InputMode::Normal;
                    self.submit_sleep(&text)
                }
                KeyCode::Esc => {
                    self.input = InputMode::Normal;
                    Ok(())
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    Ok(())
                }
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                    buffer.push(c);
                    Ok(())
                }
                _ => Ok(()),
            },
        }
    }

    /// Validate and store a sleep entry typed by the user. This is the
    /// input boundary; the store re-checks the range, but a friendly
    /// message belongs here.
    fn submit_sleep(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let hours: f64 = match text.parse() {
            Ok(value) => value,
            Err(_) => {
                self.set_error(format!("Not a number: `{text}`"));
                return Ok(());
            }
        };
        if !SLEEP_RANGE.contains(&hours) {
            self.set_error(format!("Sleep must be between 0 and 24 hours, got {hours}"));
            return Ok(());
        }
        let date_key = self.selected_key();
        self.habits.update_sleep(&date_key, hours)
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        // Main layout: header, body, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header with quote
                Constraint::Min(10),   // Body
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        // Body layout: sidebar (left) and content (right)
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(32), // Calendar + stats
                Constraint::Min(40),    // Content
            ])
            .split(main_chunks[1]);

        let sidebar_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(9),    // Calendar
                Constraint::Length(5), // Stats
            ])
            .split(body_chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40), // Habits
                Constraint::Percentage(30), // Journal
                Constraint::Percentage(30), // Sleep
            ])
            .split(body_chunks[1]);

        let month_title = format!(
            "{} {}",
            dates::month_name(self.viewed_month),
            self.viewed_year
        );
        let quote = quote_for_date(dates::today());
        QuoteBanner::new(quote, &month_title, &self.theme).render(frame, main_chunks[0]);

        let calendar = CalendarPanel::new(
            self.viewed_year,
            self.viewed_month,
            self.selected_day,
            &self.habits,
            &self.theme,
        );
        calendar.render(
            frame,
            sidebar_chunks[0],
            self.focused == FocusedPanel::Calendar,
        );

        let stats = self
            .habits
            .monthly_stats(self.viewed_year, self.viewed_month);
        StatsPanel::new(&stats, &self.theme).render(frame, sidebar_chunks[1]);

        let date_key = self.selected_key();

        let adding = match &self.input {
            InputMode::AddingHabit(buffer) => Some(buffer.as_str()),
            _ => None,
        };
        let checklist = HabitChecklist::new(
            &self.habits,
            &date_key,
            self.selected_habit,
            adding,
            &self.theme,
        );
        checklist.render(
            frame,
            content_chunks[0],
            self.focused == FocusedPanel::Habits,
        );

        let journal_editing = match &self.input {
            InputMode::EditingJournal(buffer) => Some(buffer.as_str()),
            _ => None,
        };
        let journal = JournalPanel::new(
            self.habits.journal_entry(&date_key),
            journal_editing,
            &date_key,
            &self.theme,
        );
        journal.render(
            frame,
            content_chunks[1],
            self.focused == FocusedPanel::Journal,
        );

        let sleep_editing = match &self.input {
            InputMode::EditingSleep(buffer) => Some(buffer.as_str()),
            _ => None,
        };
        let sleep = SleepPanel::new(
            self.viewed_year,
            self.viewed_month,
            self.selected_day,
            &self.habits,
            sleep_editing,
            &self.theme,
        );
        sleep.render(frame, content_chunks[2], self.focused == FocusedPanel::Sleep);

        let status_bar = StatusBar::new(
            &self.users.user().full_name,
            self.error_message.as_deref(),
            &self.theme,
        );
        status_bar.render(frame, main_chunks[2]);

        // Render overlays if active
        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
        if self.show_profile {
            let profile = ProfileOverlay::new(self.users.user(), &self.theme);
            profile.render(frame, size);
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(config);

    // Main loop - always restore terminal, regardless of result
    let result = run_main_loop(&mut terminal, &mut app);

    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Render - if this fails, we should exit
        terminal.draw(|f| app.render(f))?;

        // Block until the next input event; all state changes are
        // keyboard-driven, so there is nothing to poll for
        if let Event::Key(key) = event::read()? {
            if let Err(e) = app.handle_input(key.code, key.modifiers) {
                // Show the error but don't crash
                app.set_error(format!("{e:#}"));
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
