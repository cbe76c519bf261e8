//! The one error surfaced to callers.
//!
//! Everything here carries a display-ready message and is reported to the end
//! user verbatim. Internal irregularities inside a suggestion rule (an
//! impossible calendar construction, an out-of-range degraded date) are not
//! errors: they yield zero candidates for that rule and the rest of the list
//! proceeds.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInputError {
    #[error("`{0}` isn't a valid time!")]
    InvalidTime(String),

    #[error("`{0}` isn't a valid date!")]
    InvalidDate(String),

    #[error("`{0}` is not a valid time zone.")]
    UnknownTimeZone(String),

    /// The local date-time falls in a daylight-saving "spring forward" gap.
    #[error("The date/time {0} is not a valid time in the time zone {1}!")]
    SkippedTime(NaiveDateTime, String),
}
