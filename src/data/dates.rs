//! Calendar-date helpers shared by the stores and the UI.
//!
//! All per-day records are keyed by a `YYYY-MM-DD` string derived from the
//! host's local calendar date (`chrono::Local`), never from UTC. `today` is
//! the only function in the data layer that reads the wall clock; everything
//! else takes explicit dates so stats stay deterministic.

use chrono::{Datelike, Local, Month, NaiveDate};

/// English month names, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a date as its storage key (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Build a storage key directly from calendar fields.
pub fn day_key(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// The current date in the host's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Number of days in a calendar month (1-12). Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// Resolve an English month name ("June", "jun") to its number (1-12).
pub fn month_from_name(name: &str) -> Option<u32> {
    name.trim()
        .parse::<Month>()
        .ok()
        .map(|m| m.number_from_month())
}

/// Display name for a month number (1-12).
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date_key(date), "2025-03-07");
        assert_eq!(day_key(2025, 3, 7), "2025-03-07");
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 6), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_days_in_month_invalid_month() {
        assert_eq!(days_in_month(2025, 0), 0);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(month_from_name("June"), Some(6));
        assert_eq!(month_from_name("december"), Some(12));
        assert_eq!(month_from_name(" Jan "), Some(1));
        assert_eq!(month_from_name("Smarch"), None);
    }

    #[test]
    fn test_month_name_roundtrip() {
        for m in 1..=12 {
            assert_eq!(month_from_name(month_name(m)), Some(m));
        }
    }
}
