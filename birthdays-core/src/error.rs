//! Error types for the birthdays ecosystem.

use thiserror::Error;

/// Errors that can occur in birthdays operations.
#[derive(Error, Debug)]
pub enum BirthdaysError {
    #[error("Invalid birth date '{0}': expected an ISO date like 1990-03-06")]
    InvalidBirthDate(String),
}

/// Result type alias for birthdays operations.
pub type BirthdaysResult<T> = Result<T, BirthdaysError>;
