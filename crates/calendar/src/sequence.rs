//! Inclusive daily date sequences.

use chrono::NaiveDate;

/// Generates every date from `start` through `end`, inclusive.
///
/// Returns an empty vector when `end` precedes `start`.
pub fn date_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}
