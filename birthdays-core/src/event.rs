//! Feed output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A finished all-day feed entry, ready for serialization.
///
/// Carries no identity beyond its date and title; duplicate input records
/// produce duplicate events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    pub title: String,
    /// All-day date (no time component)
    pub date: NaiveDate,
    /// Extra context shown in the event body (e.g. a contact ID)
    pub note: Option<String>,
}
