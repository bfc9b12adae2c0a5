//! Birthday records as supplied by the upstream fetch layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BirthdaysError, BirthdaysResult};

/// One person's birthday, already validated at the input boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthdayRecord {
    /// Display name, never empty (rows without a name are dropped upstream)
    pub name: String,
    /// Birth date, no time-of-day component
    pub birth_date: NaiveDate,
    /// Opaque contact identifier (e.g. a QQ number), attached to the event note
    pub contact_id: Option<String>,
    /// Suppress the numeric age in the event title
    #[serde(default = "default_hide_age")]
    pub hide_age: bool,
}

fn default_hide_age() -> bool {
    true
}

/// Parse a birth date from a database date string.
///
/// Notion date values are ISO 8601 `start` strings; a plain date is the
/// common case, but values saved from the UI can carry a time component
/// ("1990-03-06T00:00:00.000+08:00"). Only the date part matters here.
pub fn parse_birth_date(s: &str) -> BirthdaysResult<NaiveDate> {
    // Truncate only at a time separator; anything else after the date
    // part makes the whole value malformed
    let date_part = match (s.get(..10), s.as_bytes().get(10)) {
        (Some(date), None | Some(b'T')) => date,
        _ => s,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| BirthdaysError::InvalidBirthDate(s.to_string()))
}
