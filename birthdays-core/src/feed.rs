//! Feed inclusion policy and event builder.
//!
//! Decides which anniversary occurrence each record contributes to the
//! feed. Every record yields its next occurrence; a birthday that already
//! passed earlier in the current calendar week stays at its elapsed date
//! so the week view still shows it. Occurrences that elapsed before the
//! current week are not surfaced at their elapsed date.

use chrono::{Datelike, Duration, NaiveDate};

use crate::event::OutputEvent;
use crate::record::BirthdayRecord;
use crate::recurrence::resolve_occurrence;

/// Monday (start of week) of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The occurrence a record contributes to the feed: its calendar date and
/// the age turned on that date. Derived per run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOccurrence {
    pub date: NaiveDate,
    pub age: i32,
}

/// Pick the occurrence for a single record relative to `reference_now`.
///
/// The next occurrence is used unless this year's occurrence already
/// elapsed within the current week, in which case the elapsed date wins.
/// A birthday falling exactly on `reference_now` has not passed and keeps
/// the next-occurrence date (which is `reference_now` itself).
pub fn occurrence_for(record: &BirthdayRecord, reference_now: NaiveDate) -> ResolvedOccurrence {
    let upcoming = resolve_occurrence(record.birth_date, reference_now);

    // This calendar year's occurrence, which may already be in the past.
    let year_start = NaiveDate::from_ymd_opt(reference_now.year(), 1, 1).unwrap();
    let this_year = resolve_occurrence(record.birth_date, year_start);

    let passed_this_week = week_start(reference_now) <= this_year && this_year < reference_now;
    let date = if passed_this_week { this_year } else { upcoming };

    ResolvedOccurrence {
        date,
        age: date.year() - record.birth_date.year(),
    }
}

/// Build the feed for a snapshot of records.
///
/// Pure: no I/O, no shared state. Events preserve input record order and
/// are not deduplicated; an empty snapshot yields an empty feed.
pub fn build_feed(records: &[BirthdayRecord], reference_now: NaiveDate) -> Vec<OutputEvent> {
    records
        .iter()
        .map(|record| {
            let occurrence = occurrence_for(record, reference_now);

            let title = if record.hide_age {
                format!("{}'s birthday", record.name)
            } else {
                format!("{} turns {}", record.name, occurrence.age)
            };

            let note = record
                .contact_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| format!("Contact ID: {}", id));

            OutputEvent {
                title,
                date: occurrence.date,
                note,
            }
        })
        .collect()
}
