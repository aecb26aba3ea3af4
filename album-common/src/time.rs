//! Date parsing and formatting utilities
//!
//! Resolved photo dates are `DateTime<FixedOffset>` truncated to whole
//! seconds. Naive inputs (EXIF tags, override strings without an offset,
//! filesystem times) are pinned to the local time zone.

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, SubsecRound, TimeZone,
};
use std::time::SystemTime;

/// Display format used in `/photos-list` responses
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the EXIF `DateTimeOriginal` / `DateTime` tags
pub const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 override string.
///
/// A trailing `Z` is read as `+00:00`. Values without an offset are taken as
/// local time. A bare date means local midnight. Returns `None` for anything
/// else.
pub fn parse_iso8601(value: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(rest) => format!("{}+00:00", rest),
        None => trimmed.to_string(),
    };

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt.trunc_subsecs(0));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(localize(naive));
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(localize)
}

/// Parse an EXIF date tag value (`YYYY:MM:DD HH:MM:SS`) as local time.
///
/// Trailing NUL padding, which some cameras write, is ignored.
pub fn parse_exif_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = value.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(trimmed, EXIF_FORMAT)
        .ok()
        .map(localize)
}

/// Convert a filesystem timestamp to a local, second-precision date
pub fn from_system_time(time: SystemTime) -> DateTime<FixedOffset> {
    let local: DateTime<Local> = time.into();
    DateTime::<FixedOffset>::from(local).trunc_subsecs(0)
}

/// Pin a naive date-time to the local time zone.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times that do
/// not exist locally (DST spring-forward gap) are read as if they were UTC
/// and shifted into local time.
pub fn localize(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    let local = match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Local.from_utc_datetime(&naive),
    };
    DateTime::<FixedOffset>::from(local).trunc_subsecs(0)
}

/// Render a resolved date in its own offset as `YYYY-MM-DD HH:MM:SS`
pub fn format_display(date: &DateTime<FixedOffset>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
