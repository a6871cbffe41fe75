//! Crate error type for edit and import operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced when an edit, import, or form write is rejected.
///
/// Rejection always leaves the editor in its previous valid state; callers
/// surface the message and keep going.
#[derive(Debug, Error)]
pub enum EditError {
    /// Time text did not parse as zero-padded 24-hour `HH:MM`.
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTimeText(String),

    /// Date text did not parse as ISO `YYYY-MM-DD`.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDateText(String),

    /// Date falls outside the configured supported range.
    #[error("date {0} is outside the supported date range")]
    DateOutOfRange(NaiveDate),

    /// Time falls outside the night's time domain.
    #[error("time {0:+.2}h is outside the night time domain")]
    TimeOutOfDomain(f64),

    /// Start time would not be strictly earlier than end time.
    #[error("start time must be earlier than end time")]
    InvertedInterval,

    /// Two observations on the same night would overlap.
    #[error("observation overlaps another observation on {date}")]
    OverlappingObservation { date: NaiveDate },

    /// Filter set exceeds the configured cardinality limit.
    #[error("filter set exceeds the maximum of {max} filters")]
    TooManyFilters { max: usize },

    /// Filter identifier is not part of the configured alphabet.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// Category is not part of the configured category list.
    #[error("unknown observation category '{0}'")]
    UnknownCategory(String),

    /// Observation document could not be deserialized.
    #[error("invalid observation document: {0}")]
    Document(String),
}

pub type Result<T> = std::result::Result<T, EditError>;
