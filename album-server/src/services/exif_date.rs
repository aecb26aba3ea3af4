//! EXIF capture date extraction
//!
//! Reads the EXIF block from any container kamadak-exif understands
//! (JPEG, PNG, TIFF, HEIF, WebP) and picks the capture date:
//! `DateTimeOriginal` first, then `DateTime`.

use album_common::time::parse_exif_datetime;
use chrono::{DateTime, FixedOffset};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// I/O error (file open)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Container unsupported or EXIF block malformed
    #[error("Failed to read EXIF: {0}")]
    ReadError(String),
}

/// Tags consulted for the capture date, highest priority first
const DATE_TAGS: [Tag; 2] = [Tag::DateTimeOriginal, Tag::DateTime];

/// Read the capture date of an image.
///
/// `Ok(None)` means the file has no EXIF block or no usable date tag.
pub fn read_capture_date(path: &Path) -> Result<Option<DateTime<FixedOffset>>, MetadataError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(MetadataError::ReadError(e.to_string())),
    };

    Ok(capture_date(&exif))
}

fn capture_date(exif: &Exif) -> Option<DateTime<FixedOffset>> {
    DATE_TAGS.iter().find_map(|tag| {
        let field = exif.get_field(*tag, In::PRIMARY)?;
        let parsed = match &field.value {
            Value::Ascii(values) => values
                .first()
                .and_then(|raw| parse_exif_datetime(&String::from_utf8_lossy(raw))),
            _ => None,
        };
        if parsed.is_none() {
            tracing::debug!(tag = %tag, "Ignoring unparseable EXIF date tag");
        }
        parsed
    })
}
