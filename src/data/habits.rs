//! Habit tracking store.
//!
//! Owns the four habit-tracking state slices (habit list, per-day
//! completion marks, journal entries, and sleep data) and mediates every
//! read and write against durable storage. Each mutator updates in-memory
//! state and then writes the whole affected slice back, so the durable copy
//! is never more than one mutation behind. Multi-slice operations persist
//! one slice at a time; the writes are individually durable, not atomic as
//! a pair.

use anyhow::Result;
use thiserror::Error;

use super::dates;
use super::models::{
    DailyHabitRecord, HabitList, JournalRecord, MonthlyStats, SleepRecord, default_habit_list,
};
use super::storage::{self, Storage};

/// Inclusive bounds for a nightly sleep entry, in hours
pub const SLEEP_RANGE: std::ops::RangeInclusive<f64> = 0.0..=24.0;

/// Input rejected by a store operation
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("sleep hours must be within 0-24, got {0}")]
    SleepOutOfRange(f64),
    #[error("unknown month name: `{0}`")]
    UnknownMonth(String),
}

/// In-memory owner of the habit-tracking slices
pub struct HabitStore {
    storage: Storage,
    habit_list: HabitList,
    daily_habits: DailyHabitRecord,
    daily_journal: JournalRecord,
    sleep_data: SleepRecord,
}

impl HabitStore {
    /// Create a store over the given storage, loading every slice. A slice
    /// that is missing or fails to parse keeps its built-in default.
    pub fn new(storage: Storage) -> Self {
        let habit_list = storage
            .load_slice(storage::HABITS_KEY)
            .unwrap_or_else(default_habit_list);
        let daily_habits = storage
            .load_slice(storage::DAILY_HABITS_KEY)
            .unwrap_or_default();
        let daily_journal = storage.load_slice(storage::JOURNAL_KEY).unwrap_or_default();
        let sleep_data = storage.load_slice(storage::SLEEP_KEY).unwrap_or_default();

        HabitStore {
            storage,
            habit_list,
            daily_habits,
            daily_journal,
            sleep_data,
        }
    }

    /// The ordered habit list
    pub fn habit_list(&self) -> &[String] {
        &self.habit_list
    }

    /// Journal text for a day, if an entry exists
    pub fn journal_entry(&self, date_key: &str) -> Option<&str> {
        self.daily_journal.get(date_key).map(|s| s.as_str())
    }

    /// Recorded sleep hours for a day, if any
    pub fn sleep_hours(&self, date_key: &str) -> Option<f64> {
        self.sleep_data.get(date_key).copied()
    }

    /// Completion state for one habit on one day; absent counts as not done
    pub fn is_habit_done(&self, date_key: &str, habit: &str) -> bool {
        self.daily_habits
            .get(date_key)
            .and_then(|marks| marks.get(habit))
            .copied()
            .unwrap_or(false)
    }

    /// Number of habits marked done on a day
    pub fn habits_done_on(&self, date_key: &str) -> usize {
        self.daily_habits
            .get(date_key)
            .map(|marks| marks.values().filter(|&&done| done).count())
            .unwrap_or(0)
    }

    /// Upsert the journal entry for a day. Content is arbitrary text,
    /// including the empty string (which stats treat as "no entry").
    pub fn update_journal(&mut self, date_key: &str, content: &str) -> Result<()> {
        self.daily_journal
            .insert(date_key.to_string(), content.to_string());
        self.storage
            .save_slice(storage::JOURNAL_KEY, &self.daily_journal)
    }

    /// Append a habit to the end of the list. Names are trimmed; an empty
    /// or already-present name is a no-op.
    pub fn add_habit(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || self.habit_list.iter().any(|h| h == name) {
            return Ok(());
        }
        self.habit_list.push(name.to_string());
        self.storage.save_slice(storage::HABITS_KEY, &self.habit_list)
    }

    /// Remove a habit from the list and delete its mark from every day.
    /// Persists the list and the daily marks as two separate writes.
    pub fn remove_habit(&mut self, name: &str) -> Result<()> {
        self.habit_list.retain(|h| h != name);
        for marks in self.daily_habits.values_mut() {
            marks.remove(name);
        }
        self.storage
            .save_slice(storage::HABITS_KEY, &self.habit_list)?;
        self.storage
            .save_slice(storage::DAILY_HABITS_KEY, &self.daily_habits)
    }

    /// Flip a habit's completion mark for a day, treating an absent mark as
    /// not done. Toggles for names outside the current habit list are
    /// ignored, so a removed habit cannot leave orphaned marks behind.
    pub fn toggle_habit(&mut self, date_key: &str, name: &str) -> Result<()> {
        if !self.habit_list.iter().any(|h| h == name) {
            return Ok(());
        }
        let marks = self.daily_habits.entry(date_key.to_string()).or_default();
        let done = marks.entry(name.to_string()).or_insert(false);
        *done = !*done;
        self.storage
            .save_slice(storage::DAILY_HABITS_KEY, &self.daily_habits)
    }

    /// Upsert the sleep duration for a day. Values outside [0, 24] are
    /// rejected here as well as at the input boundary.
    pub fn update_sleep(&mut self, date_key: &str, hours: f64) -> Result<()> {
        if !SLEEP_RANGE.contains(&hours) {
            return Err(StoreError::SleepOutOfRange(hours).into());
        }
        self.sleep_data.insert(date_key.to_string(), hours);
        self.storage.save_slice(storage::SLEEP_KEY, &self.sleep_data)
    }

    /// Aggregate statistics for one calendar month. Pure read: the caller
    /// supplies the year being viewed, and the wall clock is never
    /// consulted.
    pub fn monthly_stats(&self, year: i32, month: u32) -> MonthlyStats {
        let days = dates::days_in_month(year, month);

        let mut completed_habits = 0;
        let mut total_sleep = 0.0;
        let mut sleep_days = 0;
        let mut journal_days = 0;

        for day in 1..=days {
            let key = dates::day_key(year, month, day);

            if let Some(marks) = self.daily_habits.get(&key) {
                completed_habits += marks.values().filter(|&&done| done).count();
            }

            // A recorded 0.0 still counts toward the average; only absent
            // days are excluded.
            if let Some(&hours) = self.sleep_data.get(&key) {
                total_sleep += hours;
                sleep_days += 1;
            }

            if self
                .daily_journal
                .get(&key)
                .is_some_and(|text| !text.is_empty())
            {
                journal_days += 1;
            }
        }

        MonthlyStats {
            total_habits: self.habit_list.len() * days as usize,
            completed_habits,
            average_sleep: if sleep_days > 0 {
                total_sleep / sleep_days as f64
            } else {
                0.0
            },
            journal_days,
        }
    }

    /// Aggregate statistics for an English month name in a given year
    pub fn monthly_stats_for_name(
        &self,
        month_name: &str,
        year: i32,
    ) -> Result<MonthlyStats, StoreError> {
        let month = dates::month_from_name(month_name)
            .ok_or_else(|| StoreError::UnknownMonth(month_name.to_string()))?;
        Ok(self.monthly_stats(year, month))
    }

    /// Restore every slice to its built-in default in memory only. Called
    /// after logout has already erased the durable copies, so the live
    /// store and storage agree again.
    pub fn reset_to_defaults(&mut self) {
        self.habit_list = default_habit_list();
        self.daily_habits.clear();
        self.daily_journal.clear();
        self.sleep_data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::DEFAULT_HABITS;

    fn temp_store() -> (tempfile::TempDir, HabitStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HabitStore::new(Storage::new(dir.path().to_path_buf()));
        (dir, store)
    }

    #[test]
    fn test_new_store_starts_with_default_habits() {
        let (_dir, store) = temp_store();
        assert_eq!(store.habit_list(), DEFAULT_HABITS);
    }

    #[test]
    fn test_add_habit_appends_once_at_the_end() {
        let (_dir, mut store) = temp_store();
        store.add_habit("Meditate").unwrap();
        assert_eq!(store.habit_list().last().map(String::as_str), Some("Meditate"));

        // Repeat add is a no-op
        store.add_habit("Meditate").unwrap();
        let count = store.habit_list().iter().filter(|h| *h == "Meditate").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_add_habit_trims_and_rejects_empty_names() {
        let (_dir, mut store) = temp_store();
        store.add_habit("  Floss  ").unwrap();
        assert!(store.habit_list().iter().any(|h| h == "Floss"));

        let before = store.habit_list().len();
        store.add_habit("   ").unwrap();
        store.add_habit("").unwrap();
        assert_eq!(store.habit_list().len(), before);
    }

    #[test]
    fn test_toggle_habit_twice_is_an_involution() {
        let (_dir, mut store) = temp_store();
        assert!(!store.is_habit_done("2025-06-03", "Exercise"));

        store.toggle_habit("2025-06-03", "Exercise").unwrap();
        assert!(store.is_habit_done("2025-06-03", "Exercise"));

        store.toggle_habit("2025-06-03", "Exercise").unwrap();
        assert!(!store.is_habit_done("2025-06-03", "Exercise"));
    }

    #[test]
    fn test_remove_habit_prunes_list_and_every_day() {
        let (_dir, mut store) = temp_store();
        store.toggle_habit("2025-06-01", "Exercise").unwrap();
        store.toggle_habit("2025-06-02", "Exercise").unwrap();
        store.toggle_habit("2025-06-02", "Drink Water").unwrap();

        store.remove_habit("Exercise").unwrap();

        assert!(!store.habit_list().iter().any(|h| h == "Exercise"));
        assert!(!store.is_habit_done("2025-06-01", "Exercise"));
        assert!(!store.is_habit_done("2025-06-02", "Exercise"));
        // Other habits on those days are untouched
        assert!(store.is_habit_done("2025-06-02", "Drink Water"));
    }

    #[test]
    fn test_toggle_of_removed_habit_is_ignored() {
        let (_dir, mut store) = temp_store();
        store.remove_habit("Exercise").unwrap();

        store.toggle_habit("2025-06-03", "Exercise").unwrap();

        assert!(!store.is_habit_done("2025-06-03", "Exercise"));
        assert_eq!(store.habits_done_on("2025-06-03"), 0);
        // The list is not resurrected either
        assert!(!store.habit_list().iter().any(|h| h == "Exercise"));
    }

    #[test]
    fn test_update_journal_upserts_including_empty_text() {
        let (_dir, mut store) = temp_store();
        store.update_journal("2025-06-03", "felt great").unwrap();
        assert_eq!(store.journal_entry("2025-06-03"), Some("felt great"));

        store.update_journal("2025-06-03", "").unwrap();
        assert_eq!(store.journal_entry("2025-06-03"), Some(""));
    }

    #[test]
    fn test_update_sleep_rejects_out_of_range_values() {
        let (_dir, mut store) = temp_store();
        assert!(store.update_sleep("2025-06-03", -0.5).is_err());
        assert!(store.update_sleep("2025-06-03", 24.5).is_err());
        assert!(store.sleep_hours("2025-06-03").is_none());

        // The bounds themselves are accepted
        store.update_sleep("2025-06-03", 0.0).unwrap();
        store.update_sleep("2025-06-04", 24.0).unwrap();
        assert_eq!(store.sleep_hours("2025-06-03"), Some(0.0));
        assert_eq!(store.sleep_hours("2025-06-04"), Some(24.0));
    }

    #[test]
    fn test_monthly_stats_averages_recorded_sleep_only() {
        let (_dir, mut store) = temp_store();
        store.update_sleep("2025-06-05", 6.0).unwrap();
        store.update_sleep("2025-06-10", 8.0).unwrap();
        store.update_sleep("2025-06-15", 10.0).unwrap();

        let stats = store.monthly_stats(2025, 6);
        assert_eq!(stats.average_sleep, 8.0);
        assert_eq!(stats.total_habits, store.habit_list().len() * 30);
    }

    #[test]
    fn test_monthly_stats_counts_zero_hour_entries() {
        let (_dir, mut store) = temp_store();
        store.update_sleep("2025-06-05", 0.0).unwrap();
        store.update_sleep("2025-06-06", 8.0).unwrap();

        let stats = store.monthly_stats(2025, 6);
        assert_eq!(stats.average_sleep, 4.0);
    }

    #[test]
    fn test_monthly_stats_counts_marks_and_journal_days() {
        let (_dir, mut store) = temp_store();
        store.toggle_habit("2025-06-01", "Exercise").unwrap();
        store.toggle_habit("2025-06-01", "Drink Water").unwrap();
        store.toggle_habit("2025-06-02", "Exercise").unwrap();
        // Toggled off again: must not count
        store.toggle_habit("2025-06-02", "Exercise").unwrap();

        store.update_journal("2025-06-01", "good day").unwrap();
        store.update_journal("2025-06-02", "").unwrap();
        // Entry outside June is not counted
        store.update_journal("2025-07-01", "july").unwrap();

        let stats = store.monthly_stats(2025, 6);
        assert_eq!(stats.completed_habits, 2);
        assert_eq!(stats.journal_days, 1);
    }

    #[test]
    fn test_monthly_stats_ignores_other_years_with_same_month() {
        let (_dir, mut store) = temp_store();
        store.update_sleep("2024-06-05", 4.0).unwrap();
        store.update_sleep("2025-06-05", 8.0).unwrap();

        assert_eq!(store.monthly_stats(2025, 6).average_sleep, 8.0);
        assert_eq!(store.monthly_stats(2024, 6).average_sleep, 4.0);
    }

    #[test]
    fn test_monthly_stats_for_name_resolves_english_months() {
        let (_dir, mut store) = temp_store();
        store.update_sleep("2025-06-05", 7.0).unwrap();

        let stats = store.monthly_stats_for_name("June", 2025).unwrap();
        assert_eq!(stats.average_sleep, 7.0);

        let err = store.monthly_stats_for_name("Smarch", 2025).unwrap_err();
        assert_eq!(err, StoreError::UnknownMonth("Smarch".to_string()));
    }

    #[test]
    fn test_fresh_store_reproduces_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = HabitStore::new(Storage::new(dir.path().to_path_buf()));
            store.add_habit("Meditate").unwrap();
            store.toggle_habit("2025-06-01", "Meditate").unwrap();
            store.update_journal("2025-06-01", "first entry").unwrap();
            store.update_sleep("2025-06-01", 7.5).unwrap();
        }

        let reloaded = HabitStore::new(Storage::new(dir.path().to_path_buf()));
        assert_eq!(reloaded.habit_list().last().map(String::as_str), Some("Meditate"));
        assert!(reloaded.is_habit_done("2025-06-01", "Meditate"));
        assert_eq!(reloaded.journal_entry("2025-06-01"), Some("first entry"));
        assert_eq!(reloaded.sleep_hours("2025-06-01"), Some(7.5));
    }

    #[test]
    fn test_garbage_slice_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        storage.write(storage::HABITS_KEY, "not json at all").unwrap();
        storage.write(storage::SLEEP_KEY, "[1, 2, {").unwrap();

        let store = HabitStore::new(storage);
        assert_eq!(store.habit_list(), DEFAULT_HABITS);
        assert!(store.sleep_hours("2025-06-01").is_none());
    }

    #[test]
    fn test_reset_to_defaults_clears_memory_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        let mut store = HabitStore::new(storage.clone());
        store.add_habit("Meditate").unwrap();
        store.update_journal("2025-06-01", "entry").unwrap();

        // Simulate logout wiping the durable copies first
        for key in storage::ALL_KEYS {
            storage.remove(key).unwrap();
        }
        store.reset_to_defaults();

        assert_eq!(store.habit_list(), DEFAULT_HABITS);
        assert!(store.journal_entry("2025-06-01").is_none());
        assert!(storage.read(storage::JOURNAL_KEY).unwrap().is_none());
    }
}
