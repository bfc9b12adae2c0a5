//! Anniversary date resolution.
//!
//! Given a birth date and a reference date, computes the next occurrence
//! of the yearly anniversary. Feb 29 birthdays fall on Feb 28 in non-leap
//! years (fixed substitution day, never rolled to Mar 1).

use chrono::{Datelike, NaiveDate};

/// The anniversary of `birth_date` in `year`.
///
/// Returns a new date value; the only invalid combination is Feb 29 in a
/// non-leap year, which substitutes Feb 28.
pub fn anniversary_in_year(birth_date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap())
}

/// The single anniversary of `birth_date` that is not earlier than
/// `reference`: this year's occurrence if it hasn't passed yet (falling
/// exactly on `reference` counts as not passed), otherwise next year's.
pub fn resolve_occurrence(birth_date: NaiveDate, reference: NaiveDate) -> NaiveDate {
    let candidate = anniversary_in_year(birth_date, reference.year());
    if candidate < reference {
        anniversary_in_year(birth_date, reference.year() + 1)
    } else {
        candidate
    }
}
