//! Date corrections
//!
//! Writes a batch of `{name, date}` corrections into the date store. Names
//! and dates are stored as given; a date that does not parse is ignored at
//! resolution time.

use album_common::{DateStore, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One correction from a `/update-dates` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateUpdate {
    pub name: String,
    pub date: String,
}

/// Applies date corrections to the store
#[derive(Debug, Clone)]
pub struct DateUpdater {
    store: DateStore,
}

impl DateUpdater {
    pub fn new(store: DateStore) -> Self {
        Self { store }
    }

    /// Apply `batch` in order with one store load and one save.
    ///
    /// Either every entry is written or, on error, the store file is left as
    /// it was. Returns the number of entries written.
    pub fn apply(&self, batch: Vec<DateUpdate>) -> Result<usize> {
        let applied = self
            .store
            .set_many(batch.into_iter().map(|update| (update.name, update.date)))?;
        if applied > 0 {
            info!("Stored {} date correction(s)", applied);
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DateResolver;
    use album_common::time::format_display;
    use album_common::FileTimePreference;
    use tempfile::TempDir;

    fn update(name: &str, date: &str) -> DateUpdate {
        DateUpdate {
            name: name.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_update_then_resolve_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = DateStore::new(dir.path().join("photo_dates.json"));
        let photo = dir.path().join("a.jpg");
        std::fs::write(&photo, b"").unwrap();

        let updater = DateUpdater::new(store.clone());
        assert_eq!(updater.apply(vec![update("a.jpg", "2020-01-01 00:00:00")]).unwrap(), 1);

        let resolver = DateResolver::new(store, FileTimePreference::Created);
        let resolved = resolver.resolve(&photo).unwrap();
        assert_eq!(format_display(&resolved.date), "2020-01-01 00:00:00");
    }

    #[test]
    fn test_stores_values_verbatim_without_validation() {
        let dir = TempDir::new().unwrap();
        let store = DateStore::new(dir.path().join("photo_dates.json"));
        let updater = DateUpdater::new(store.clone());

        updater
            .apply(vec![
                update("missing-photo.jpg", "not a date"),
                update("b.png", "2021-05-05T05:05:05Z"),
            ])
            .unwrap();

        let overrides = store.load().unwrap();
        assert_eq!(overrides["missing-photo.jpg"], "not a date");
        assert_eq!(overrides["b.png"], "2021-05-05T05:05:05Z");
    }

    #[test]
    fn test_later_entry_for_same_name_wins() {
        let dir = TempDir::new().unwrap();
        let store = DateStore::new(dir.path().join("photo_dates.json"));
        let updater = DateUpdater::new(store.clone());

        updater
            .apply(vec![update("a.jpg", "2001-01-01"), update("a.jpg", "2002-02-02")])
            .unwrap();

        assert_eq!(store.get("a.jpg").unwrap().as_deref(), Some("2002-02-02"));
    }

    #[test]
    fn test_existing_entries_are_kept() {
        let dir = TempDir::new().unwrap();
        let store = DateStore::new(dir.path().join("photo_dates.json"));
        store.set("old.jpg", "1990-01-01").unwrap();

        DateUpdater::new(store.clone())
            .apply(vec![update("new.jpg", "2020-01-01")])
            .unwrap();

        let overrides = store.load().unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["old.jpg"], "1990-01-01");
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = DateStore::new(dir.path().join("photo_dates.json"));

        assert_eq!(DateUpdater::new(store.clone()).apply(Vec::new()).unwrap(), 0);
        assert!(!store.path().exists());
    }
}
