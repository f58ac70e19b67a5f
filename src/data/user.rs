//! User profile store.
//!
//! Owns the single user's profile record and mediates its persistence.
//! Logout is the one operation that reaches across slices: it erases every
//! storage key the tracker owns, then resets the in-memory profile. It
//! deliberately holds no reference to the habit store; the application
//! layer resets a live [`HabitStore`](super::HabitStore) itself after
//! calling `logout`, keeping the two stores independent.

use anyhow::Result;
use log::info;

use super::models::{ProfileUpdate, UserProfile};
use super::storage::{self, Storage};

/// In-memory owner of the user profile slice
pub struct UserStore {
    storage: Storage,
    user: UserProfile,
}

impl UserStore {
    /// Create a store over the given storage. A missing or malformed
    /// profile leaves the built-in placeholder identity in place.
    pub fn new(storage: Storage) -> Self {
        let user = storage.load_slice(storage::USER_KEY).unwrap_or_default();
        UserStore { storage, user }
    }

    /// The current profile
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Shallow-merge the supplied fields into the profile and persist it.
    /// A supplied notifications record replaces the previous one wholesale.
    pub fn update_user(&mut self, update: ProfileUpdate) -> Result<()> {
        if let Some(full_name) = update.full_name {
            self.user.full_name = full_name;
        }
        if let Some(email) = update.email {
            self.user.email = email;
        }
        if let Some(avatar_url) = update.avatar_url {
            self.user.avatar_url = avatar_url;
        }
        if let Some(time_zone) = update.time_zone {
            self.user.time_zone = time_zone;
        }
        if let Some(notifications) = update.notifications {
            self.user.notifications = notifications;
        }
        self.storage.save_slice(storage::USER_KEY, &self.user)
    }

    /// Erase every storage key the tracker owns and reset the in-memory
    /// profile to the default. Keys are removed one by one; each removal is
    /// individually durable.
    pub fn logout(&mut self) -> Result<()> {
        for key in storage::ALL_KEYS {
            self.storage.remove(key)?;
        }
        self.user = UserProfile::default();
        info!("User logged out, storage cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::NotificationPreferences;

    fn temp_store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(Storage::new(dir.path().to_path_buf()));
        (dir, store)
    }

    #[test]
    fn test_new_store_starts_with_default_profile() {
        let (_dir, store) = temp_store();
        assert_eq!(*store.user(), UserProfile::default());
    }

    #[test]
    fn test_update_user_merges_only_supplied_fields() {
        let (_dir, mut store) = temp_store();
        store
            .update_user(ProfileUpdate {
                full_name: Some("Alex Smith".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(store.user().full_name, "Alex Smith");
        // Untouched fields keep their previous values
        assert_eq!(store.user().email, "jane.doe@example.com");
        assert!(store.user().notifications.daily_reminder);
    }

    #[test]
    fn test_update_user_replaces_notifications_wholesale() {
        let (_dir, mut store) = temp_store();
        store
            .update_user(ProfileUpdate {
                notifications: Some(NotificationPreferences {
                    daily_reminder: false,
                    weekly_summary: false,
                    journal_prompt: true,
                }),
                ..Default::default()
            })
            .unwrap();

        let prefs = store.user().notifications;
        assert!(!prefs.daily_reminder);
        assert!(!prefs.weekly_summary);
        assert!(prefs.journal_prompt);
    }

    #[test]
    fn test_update_user_can_clear_the_avatar() {
        let (_dir, mut store) = temp_store();
        store
            .update_user(ProfileUpdate {
                avatar_url: Some(Some("data:image/png;base64,AAAA".to_string())),
                ..Default::default()
            })
            .unwrap();
        assert!(store.user().avatar_url.is_some());

        store
            .update_user(ProfileUpdate {
                avatar_url: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert!(store.user().avatar_url.is_none());
    }

    #[test]
    fn test_profile_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = UserStore::new(Storage::new(dir.path().to_path_buf()));
            store
                .update_user(ProfileUpdate {
                    email: Some("alex@example.com".to_string()),
                    ..Default::default()
                })
                .unwrap();
        }

        let reloaded = UserStore::new(Storage::new(dir.path().to_path_buf()));
        assert_eq!(reloaded.user().email, "alex@example.com");
    }

    #[test]
    fn test_malformed_profile_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        storage.write(storage::USER_KEY, "{\"id\": [broken").unwrap();

        let store = UserStore::new(storage);
        assert_eq!(*store.user(), UserProfile::default());
    }

    #[test]
    fn test_logout_erases_all_keys_and_resets_profile() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        // Seed habit-tracking keys alongside the profile
        storage.write(storage::JOURNAL_KEY, "{\"2025-06-01\":\"hi\"}").unwrap();
        storage.write(storage::HABITS_KEY, "[\"Exercise\"]").unwrap();

        let mut store = UserStore::new(storage.clone());
        store
            .update_user(ProfileUpdate {
                full_name: Some("Alex Smith".to_string()),
                ..Default::default()
            })
            .unwrap();

        store.logout().unwrap();

        assert_eq!(*store.user(), UserProfile::default());
        for key in storage::ALL_KEYS {
            assert!(storage.read(key).unwrap().is_none(), "key `{key}` survived logout");
        }
    }

    #[test]
    fn test_habit_store_after_logout_sees_defaults() {
        use crate::data::habits::HabitStore;
        use crate::data::models::DEFAULT_HABITS;

        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        {
            let mut habits = HabitStore::new(storage.clone());
            habits.add_habit("Meditate").unwrap();
            habits.update_journal("2025-06-01", "entry").unwrap();
        }

        let mut users = UserStore::new(storage.clone());
        users.logout().unwrap();

        let habits = HabitStore::new(storage);
        assert_eq!(habits.habit_list(), DEFAULT_HABITS);
        assert!(habits.journal_entry("2025-06-01").is_none());
    }
}
