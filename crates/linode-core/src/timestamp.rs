//! Conversion of raw API timestamps into structured values.
//!
//! The API sends `created`/`updated` as `2018-01-02T03:04:05` in UTC with no
//! offset. Records keep the raw strings and fill structured fields after
//! decoding. A value that cannot be parsed leaves the structured field unset;
//! it never fails the call.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

/// Layout used by the API for timestamps.
pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A decoded record whose timestamps need post-processing.
pub trait Record {
    /// Populate structured timestamps from their raw strings.
    fn fix_dates(&mut self) {}
}

/// Parse a raw timestamp, returning `None` when it is absent or malformed.
#[must_use]
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, API_TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    debug!(raw, "ignoring unparseable timestamp");
    None
}

/// Render a structured timestamp in the API layout.
#[must_use]
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(API_TIMESTAMP_FORMAT).to_string()
}
