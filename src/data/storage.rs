//! Durable key-value storage backing the tracker's state slices.
//!
//! The original tracker kept each state slice as JSON text under a string
//! key in the browser's localStorage. The same contract is kept here: a
//! single SQLite database with one `kv` table, one JSON document per key.
//! Keys and value shapes are unchanged, so there is no schema version;
//! a value that fails to parse is treated as absent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage key for the serialized user profile
pub const USER_KEY: &str = "habitTracker_user";
/// Storage key for per-day journal entries
pub const JOURNAL_KEY: &str = "habitTracker_journal";
/// Storage key for the ordered habit list
pub const HABITS_KEY: &str = "habitTracker_habits";
/// Storage key for per-day completion marks
pub const DAILY_HABITS_KEY: &str = "habitTracker_dailyHabits";
/// Storage key for per-day sleep hours
pub const SLEEP_KEY: &str = "habitTracker_sleep";

/// Every key the tracker owns; logout erases all of them
pub const ALL_KEYS: [&str; 5] = [
    USER_KEY,
    JOURNAL_KEY,
    HABITS_KEY,
    DAILY_HABITS_KEY,
    SLEEP_KEY,
];

/// Database file name inside the data directory
const DB_FILE: &str = "habits.db";

/// String-keyed JSON store over a local SQLite database
#[derive(Debug, Clone)]
pub struct Storage {
    db_path: PathBuf,
}

impl Storage {
    /// Create a new Storage rooted at the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Storage {
            db_path: data_dir.join(DB_FILE),
        }
    }

    /// Open a connection, creating the data directory and kv table on first use
    fn open(&self) -> Result<Connection> {
        if let Some(dir) = self.db_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {dir:?}"))?;
        }
        let conn = Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open database: {:?}", self.db_path))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .context("Failed to initialize kv table")?;
        Ok(conn)
    }

    /// Read the raw JSON text stored under a key
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        let conn = self.open()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .with_context(|| format!("Failed to read `{key}` from storage"))
    }

    /// Write raw JSON text under a key, replacing any previous value
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .with_context(|| format!("Failed to write `{key}` to storage"))?;
        Ok(())
    }

    /// Delete a key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .with_context(|| format!("Failed to remove `{key}` from storage"))?;
        Ok(())
    }

    /// Load one state slice, falling back to `None` when the key is absent
    /// or holds a value that does not deserialize. A malformed value is
    /// logged and discarded rather than surfaced; the caller keeps its
    /// built-in default.
    pub fn load_slice<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.read(key) {
            Ok(value) => value?,
            Err(err) => {
                warn!("Failed to read `{key}` from storage: {err:#}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Discarding malformed value under `{key}`: {err}");
                None
            }
        }
    }

    /// Serialize one state slice and write it under its key
    pub fn save_slice<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for `{key}`"))?;
        self.write(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let (_dir, storage) = temp_storage();
        storage.write("k", "\"hello\"").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("\"hello\""));
    }

    #[test]
    fn test_read_missing_key_is_none() {
        let (_dir, storage) = temp_storage();
        assert!(storage.read("nope").unwrap().is_none());
    }

    #[test]
    fn test_write_replaces_previous_value() {
        let (_dir, storage) = temp_storage();
        storage.write("k", "1").unwrap();
        storage.write("k", "2").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_deletes_key_and_tolerates_absence() {
        let (_dir, storage) = temp_storage();
        storage.write("k", "1").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.read("k").unwrap().is_none());
        // Second removal of the same key must not error
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_load_slice_falls_back_on_garbage() {
        let (_dir, storage) = temp_storage();
        storage.write(SLEEP_KEY, "{not valid json").unwrap();
        let loaded: Option<HashMap<String, f64>> = storage.load_slice(SLEEP_KEY);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_slice_then_load_slice_preserves_mappings() {
        let (_dir, storage) = temp_storage();
        let mut sleep = HashMap::new();
        sleep.insert("2025-06-01".to_string(), 7.5);
        sleep.insert("2025-06-02".to_string(), 8.0);
        storage.save_slice(SLEEP_KEY, &sleep).unwrap();

        let loaded: HashMap<String, f64> = storage.load_slice(SLEEP_KEY).unwrap();
        assert_eq!(loaded, sleep);
    }

    #[test]
    fn test_storage_persists_across_instances() {
        let (dir, storage) = temp_storage();
        storage.write("k", "42").unwrap();

        let second = Storage::new(dir.path().to_path_buf());
        assert_eq!(second.read("k").unwrap().as_deref(), Some("42"));
    }
}
