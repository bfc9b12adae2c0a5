//! ICS feed generation.

use chrono::{Duration, NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::event::OutputEvent;

/// Generate .ics content for a whole feed of all-day events.
/// Infallible: every OutputEvent serializes.
pub fn generate_feed(events: &[OutputEvent], calendar_name: &str) -> String {
    let mut cal = Calendar::new();
    cal.name(calendar_name);

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event_uid(event));
        ics_event.summary(&event.title);

        // DTSTAMP - required by RFC 5545
        let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        // All-day event: DTEND is exclusive, so it lands on the next day
        add_date_property(&mut ics_event, "DTSTART", event.date);
        add_date_property(&mut ics_event, "DTEND", event.date + Duration::days(1));

        // The note goes out twice: DESCRIPTION for calendar apps, plus a
        // COMMENT property some clients surface separately
        if let Some(ref note) = event.note {
            ics_event.description(note);
            ics_event.add_property("COMMENT", note);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar crate's output
    strip_ics_bloat(&cal.to_string())
}

/// Deterministic UID so regenerating the feed keeps event identity stable
/// across runs (calendar apps dedupe on UID when re-importing).
fn event_uid(event: &OutputEvent) -> String {
    format!(
        "{}-{}@birthdays",
        slug::slugify(&event.title),
        event.date.format("%Y%m%d")
    )
}

/// Add a date-valued property (VALUE=DATE, no time component)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with BIRTHDAYS (we post-process the output)
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:BIRTHDAYS\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> OutputEvent {
        OutputEvent {
            title: "Li's birthday".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            note: None,
        }
    }

    #[test]
    fn test_all_day_event_has_value_date() {
        let ics = generate_feed(&[make_test_event()], "Birthdays");

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20240306"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20240307"),
            "DTEND should be the exclusive next day. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_one_vevent_per_feed_event() {
        let mut second = make_test_event();
        second.title = "Wang's birthday".to_string();
        second.date = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();

        let ics = generate_feed(&[make_test_event(), second], "Birthdays");

        let vevent_count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(
            vevent_count, 2,
            "Should have 2 VEVENTs, got {}. ICS:\n{}",
            vevent_count, ics
        );
        assert!(ics.contains("SUMMARY:Li's birthday"), "Missing Li");
        assert!(ics.contains("SUMMARY:Wang's birthday"), "Missing Wang");
    }

    #[test]
    fn test_note_becomes_description() {
        let mut event = make_test_event();
        event.note = Some("Contact ID: 12345".to_string());

        let ics = generate_feed(&[event], "Birthdays");

        assert!(
            ics.contains("DESCRIPTION:Contact ID: 12345"),
            "Note should appear as DESCRIPTION. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("COMMENT:Contact ID: 12345"),
            "Note should also appear as COMMENT. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_no_comment_without_note() {
        let ics = generate_feed(&[make_test_event()], "Birthdays");
        assert!(!ics.contains("COMMENT:"), "ICS:\n{}", ics);
        assert!(!ics.contains("DESCRIPTION:"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_uid_is_deterministic() {
        let first = generate_feed(&[make_test_event()], "Birthdays");
        let second = generate_feed(&[make_test_event()], "Birthdays");

        let uid_line = |ics: &str| {
            ics.lines()
                .find(|l| l.starts_with("UID:"))
                .map(String::from)
                .expect("Should have a UID line")
        };
        assert_eq!(uid_line(&first), uid_line(&second));
        assert!(
            uid_line(&first).contains("li-s-birthday-20240306"),
            "UID should be derived from title and date. Got: {}",
            uid_line(&first)
        );
    }

    #[test]
    fn test_output_is_cleaned_up() {
        let ics = generate_feed(&[make_test_event()], "Birthdays");

        assert!(ics.contains("PRODID:BIRTHDAYS"), "PRODID should be replaced");
        assert!(!ics.contains("CALSCALE"), "CALSCALE should be stripped");
        assert!(
            ics.contains("X-WR-CALNAME:Birthdays"),
            "Calendar name should be set. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_empty_feed_is_a_valid_calendar() {
        let ics = generate_feed(&[], "Birthdays");
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
