//! Data layer: state stores and their durable storage.
//!
//! Handles loading and persisting the habit, journal, sleep, and user
//! profile slices, plus derived monthly statistics and the daily quote.

pub mod dates;
mod habits;
mod models;
mod quotes;
mod storage;
mod user;

pub use habits::{HabitStore, SLEEP_RANGE, StoreError};
pub use models::{MonthlyStats, NotificationPreferences, ProfileUpdate, UserProfile};
pub use quotes::{Quote, quote_for_date};
pub use storage::Storage;
pub use user::UserStore;
