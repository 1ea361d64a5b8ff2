//! Error types for wd50-stack.

use chrono::NaiveDate;

/// Per-day failure reported by a [`DailyGridSource`](crate::DailyGridSource).
///
/// Both variants are non-fatal: the stack builder skips the day.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// The source has no grid for this date.
    #[error("no grid available for {date}: {reason}")]
    Unavailable {
        /// Requested date.
        date: NaiveDate,
        /// Source-specific explanation.
        reason: String,
    },

    /// A grid exists but could not be decoded.
    #[error("failed to decode grid for {date}: {reason}")]
    Decode {
        /// Requested date.
        date: NaiveDate,
        /// Decoder-specific explanation.
        reason: String,
    },
}

/// Fatal errors while building a water-year stack.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// Invalid [`StackConfig`](crate::StackConfig).
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of failed checks.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// The water year could not be turned into calendar dates.
    #[error("calendar error: {0}")]
    Calendar(#[from] wd50_calendar::CalendarError),

    /// A day's grid shape differs from the shape fixed by the first day.
    #[error("grid for {date} has shape {got:?}, stack was established with {expected:?}")]
    ShapeChanged {
        /// Offending date.
        date: NaiveDate,
        /// Shape fixed by the first retrieved day.
        expected: (usize, usize),
        /// Shape of the offending day.
        got: (usize, usize),
    },

    /// The daily values could not be arranged into a `[day, lat, lon]` array.
    #[error("stack assembly failed: {0}")]
    Assembly(#[from] ndarray::ShapeError),
}
