//! Persisted date overrides
//!
//! The store is a single JSON object mapping photo filename to a date string,
//! e.g. `photo_dates.json`:
//!
//! ```json
//! {
//!   "IMG_0001.jpg": "2020-01-01 00:00:00",
//!   "scan.png": "1998-07-14T12:00:00Z"
//! }
//! ```
//!
//! The whole file is read on every load and rewritten on every save. A missing
//! file is an empty mapping. Date strings are stored verbatim; they are only
//! parsed when a photo date is resolved.

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Filename -> date string mapping held in the store file
pub type DateOverrides = BTreeMap<String, String>;

/// Handle to the date override file.
///
/// Clones share one write lock, so load-modify-save cycles issued through
/// any clone in this process never interleave.
#[derive(Debug, Clone)]
pub struct DateStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl DateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping.
    ///
    /// Returns an empty mapping when the file does not exist and
    /// [`Error::StoreCorrupt`] when it exists but is not a JSON object of
    /// strings.
    pub fn load(&self) -> Result<DateOverrides> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Date store not found, using empty mapping");
                return Ok(DateOverrides::new());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        serde_json::from_str(&content).map_err(|source| Error::StoreCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `overrides`, pretty-printed with 2-space
    /// indentation.
    ///
    /// The JSON is written to a sibling temp file and renamed into place, so
    /// readers never observe a half-written store.
    pub fn save(&self, overrides: &DateOverrides) -> Result<()> {
        let json = serde_json::to_string_pretty(overrides)
            .map_err(|e| Error::InvalidInput(format!("Cannot serialize date store: {}", e)))?;

        let tmp_path = self.temp_path();
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::Io(e));
        }

        debug!(path = %self.path.display(), entries = overrides.len(), "Saved date store");
        Ok(())
    }

    /// Look up the override for one filename
    pub fn get(&self, filename: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(filename))
    }

    /// Set (or overwrite) one override
    pub fn set(&self, filename: &str, date: &str) -> Result<()> {
        self.set_many([(filename.to_string(), date.to_string())])?;
        Ok(())
    }

    /// Apply several overrides with a single load and a single save.
    ///
    /// Entries are applied in order, so a later entry for the same filename
    /// wins. An empty batch leaves the file untouched. Returns the number of
    /// entries applied.
    pub fn set_many<I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return Ok(0);
        }

        let _guard = self.lock();
        let mut overrides = self.load()?;
        let mut applied = 0;
        for (filename, date) in entries {
            overrides.insert(filename, date);
            applied += 1;
        }
        self.save(&overrides)?;

        Ok(applied)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "photo_dates.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
