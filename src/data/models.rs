//! Data models for the habit tracker's persisted state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ordered list of habit names, insertion order preserved.
pub type HabitList = Vec<String>;

/// Per-day habit completion marks: date key -> habit name -> done.
pub type DailyHabitRecord = HashMap<String, HashMap<String, bool>>;

/// Per-day journal entries: date key -> free text.
pub type JournalRecord = HashMap<String, String>;

/// Per-day sleep durations in hours: date key -> hours.
pub type SleepRecord = HashMap<String, f64>;

/// Habits every new tracker starts with
pub const DEFAULT_HABITS: [&str; 5] = [
    "Drink Water",
    "Morning Stretch",
    "Read 20 minutes",
    "Write Journal",
    "Exercise",
];

/// The default habit list as an owned vector
pub fn default_habit_list() -> HabitList {
    DEFAULT_HABITS.iter().map(|h| h.to_string()).collect()
}

/// The single user's profile record.
///
/// Serialized field names are camelCase to match the wire format the
/// original tracker stored under `habitTracker_user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Data URL of the avatar image, if one was set
    pub avatar_url: Option<String>,
    /// Display label only; date math always uses the host's local calendar
    pub time_zone: String,
    pub notifications: NotificationPreferences,
}

/// Three independent notification switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub daily_reminder: bool,
    pub weekly_summary: bool,
    pub journal_prompt: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            id: "1".to_string(),
            full_name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            avatar_url: None,
            time_zone: "GMT+07:00".to_string(),
            notifications: NotificationPreferences::default(),
        }
    }
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            daily_reminder: true,
            weekly_summary: true,
            journal_prompt: false,
        }
    }
}

/// Partial profile update; `None` fields keep their current value.
///
/// A supplied `notifications` record replaces the previous one wholesale:
/// the merge is shallow, last write wins per top-level field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub time_zone: Option<String>,
    pub notifications: Option<NotificationPreferences>,
}

/// Aggregate statistics for one calendar month, derived on demand and never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyStats {
    /// Habit slots in the month: list length x days in month
    pub total_habits: usize,
    /// Completion marks set to true across the month
    pub completed_habits: usize,
    /// Mean of the sleep values recorded in the month; 0.0 when none
    pub average_sleep: f64,
    /// Days with a non-empty journal entry
    pub journal_days: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_placeholder_identity() {
        let user = UserProfile::default();
        assert_eq!(user.id, "1");
        assert_eq!(user.full_name, "Jane Doe");
        assert!(user.avatar_url.is_none());
        assert!(user.notifications.daily_reminder);
        assert!(user.notifications.weekly_summary);
        assert!(!user.notifications.journal_prompt);
    }

    #[test]
    fn test_profile_serializes_with_camel_case_fields() {
        let json = serde_json::to_string(&UserProfile::default()).unwrap();
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"avatarUrl\""));
        assert!(json.contains("\"dailyReminder\""));
        assert!(!json.contains("full_name"));
    }

    #[test]
    fn test_default_habit_list_has_five_entries_in_order() {
        let list = default_habit_list();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0], "Drink Water");
        assert_eq!(list[4], "Exercise");
    }
}
