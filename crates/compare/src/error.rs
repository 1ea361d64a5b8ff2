//! Error types for wd50-compare.

use wd50_regrid::RegridError;

/// Errors from period comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// One or more validation checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },

    /// The two periods are not on the same axes; align them first.
    #[error("periods are on different axes ({earlier:?} vs {later:?}); regrid before comparing")]
    AxesMismatch {
        /// Shape of the earlier period's axes.
        earlier: (usize, usize),
        /// Shape of the later period's axes.
        later: (usize, usize),
    },

    /// The two periods hold different metrics.
    #[error("cannot compare {earlier} with {later}")]
    MetricMismatch {
        earlier: &'static str,
        later: &'static str,
    },

    /// Region subsetting failed.
    #[error("region subset failed: {0}")]
    Region(#[from] RegridError),

    /// A station record could not be assigned to water years.
    #[error("calendar error: {0}")]
    Calendar(#[from] wd50_calendar::CalendarError),

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
