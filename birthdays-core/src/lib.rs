//! Core types and birthday recurrence logic for the birthdays ecosystem.
//!
//! Everything in this crate is a pure function of its inputs: birthday
//! records, anniversary resolution, the feed inclusion policy, and ICS
//! generation. Fetching records from Notion and writing files belongs to
//! birthdays-cli.

pub mod error;
pub mod event;
pub mod feed;
pub mod ics;
pub mod record;
pub mod recurrence;

// Re-export the main types at crate root for convenience
pub use error::{BirthdaysError, BirthdaysResult};
pub use event::OutputEvent;
pub use feed::{build_feed, week_start};
pub use record::BirthdayRecord;
pub use recurrence::resolve_occurrence;
