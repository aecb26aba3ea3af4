//! Photo date resolution
//!
//! Priority order, first success wins:
//! 1. Override from the date store (ISO-8601, trailing `Z` = UTC)
//! 2. EXIF `DateTimeOriginal`, then EXIF `DateTime`
//! 3. Filesystem creation time
//! 4. Filesystem modification time
//!
//! Failures in steps 1-3 fall through to the next step. Only a corrupt store
//! or an unreadable file (no modification time) escapes as an error.

use album_common::store::{DateOverrides, DateStore};
use album_common::time::{from_system_time, parse_iso8601};
use album_common::{FileTimePreference, Result};
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use super::exif_date::read_capture_date;

/// Where a resolved date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    Override,
    Exif,
    Created,
    Modified,
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateSource::Override => "override",
            DateSource::Exif => "exif",
            DateSource::Created => "created",
            DateSource::Modified => "modified",
        };
        f.write_str(name)
    }
}

/// A photo's resolved date, second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: DateTime<FixedOffset>,
    pub source: DateSource,
}

/// Resolves photo dates against a date store
#[derive(Debug, Clone)]
pub struct DateResolver {
    store: DateStore,
    file_time: FileTimePreference,
}

impl DateResolver {
    pub fn new(store: DateStore, file_time: FileTimePreference) -> Self {
        Self { store, file_time }
    }

    pub fn store(&self) -> &DateStore {
        &self.store
    }

    /// Resolve one photo, reading the store fresh
    pub fn resolve(&self, path: &Path) -> Result<ResolvedDate> {
        let overrides = self.store.load()?;
        self.resolve_with(&overrides, path)
    }

    /// Resolve one photo against an already-loaded override mapping
    pub fn resolve_with(&self, overrides: &DateOverrides, path: &Path) -> Result<ResolvedDate> {
        if let Some(date) = override_date(overrides, path) {
            return Ok(ResolvedDate {
                date,
                source: DateSource::Override,
            });
        }

        match read_capture_date(path) {
            Ok(Some(date)) => {
                return Ok(ResolvedDate {
                    date,
                    source: DateSource::Exif,
                })
            }
            Ok(None) => debug!(path = %path.display(), "No EXIF date"),
            Err(e) => debug!(path = %path.display(), error = %e, "EXIF unreadable"),
        }

        let metadata = std::fs::metadata(path)?;

        if self.file_time == FileTimePreference::Created {
            match metadata.created() {
                Ok(created) => {
                    return Ok(ResolvedDate {
                        date: from_system_time(created),
                        source: DateSource::Created,
                    })
                }
                Err(e) => debug!(path = %path.display(), error = %e, "Creation time unavailable"),
            }
        }

        Ok(ResolvedDate {
            date: from_system_time(metadata.modified()?),
            source: DateSource::Modified,
        })
    }
}

fn override_date(overrides: &DateOverrides, path: &Path) -> Option<DateTime<FixedOffset>> {
    let filename = path.file_name()?.to_str()?;
    let raw = overrides.get(filename)?;

    let parsed = parse_iso8601(raw);
    if parsed.is_none() {
        warn!(
            photo = filename,
            value = raw.as_str(),
            "Ignoring unparseable date override"
        );
    }
    parsed
}
