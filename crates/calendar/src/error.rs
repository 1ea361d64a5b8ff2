//! Error types for the wd50-calendar crate.

/// Error type for all fallible operations in the wd50-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a water year cannot be represented as calendar dates.
    #[error("water year {year} is outside the supported date range")]
    YearOutOfRange {
        /// The water year that could not be converted.
        year: i32,
    },
}
