//! Photo listing
//!
//! Enumerates the flat photo directory, resolves a date per image and returns
//! them oldest first.

use album_common::config::has_extension;
use album_common::time::format_display;
use album_common::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::date_resolver::{DateResolver, ResolvedDate};

/// One `/photos-list` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoEntry {
    pub name: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub date: String,
}

/// Lists photos of one directory, sorted by resolved date
#[derive(Debug, Clone)]
pub struct PhotoLister {
    resolver: DateResolver,
    photo_dir: PathBuf,
    extensions: Vec<String>,
}

impl PhotoLister {
    /// `extensions` are lowercase without the leading dot
    pub fn new(resolver: DateResolver, photo_dir: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            resolver,
            photo_dir,
            extensions,
        }
    }

    pub fn photo_dir(&self) -> &std::path::Path {
        &self.photo_dir
    }

    /// List every accepted image, ascending by resolved date.
    ///
    /// Photos with equal dates keep directory enumeration order.
    pub fn list(&self) -> Result<Vec<PhotoEntry>> {
        if !self.photo_dir.is_dir() {
            return Err(Error::DirectoryNotFound(self.photo_dir.clone()));
        }

        let overrides = self.resolver.store().load()?;

        let mut photos: Vec<(String, ResolvedDate)> = Vec::new();
        for entry in std::fs::read_dir(&self.photo_dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(name = ?raw, "Skipping photo with non UTF-8 filename");
                    continue;
                }
            };
            if !self.accepts(&name) {
                continue;
            }

            let path = entry.path();
            // Follows symlinks, unlike DirEntry::file_type
            if !path.is_file() {
                continue;
            }

            let resolved = self.resolver.resolve_with(&overrides, &path)?;
            debug!(photo = %name, date = %resolved.date, source = %resolved.source, "Resolved photo date");
            photos.push((name, resolved));
        }

        photos.sort_by_key(|(_, resolved)| resolved.date);

        Ok(photos
            .into_iter()
            .map(|(name, resolved)| PhotoEntry {
                name,
                date: format_display(&resolved.date),
            })
            .collect())
    }

    fn accepts(&self, filename: &str) -> bool {
        has_extension(filename, &self.extensions)
    }
}
