//! Seam between the trend engine and a statistical test.

use crate::outcome::TrendOutcome;

/// A monotonic trend test applied to one `(year, value)` series.
///
/// Implementations receive the series in any order and may contain missing
/// values; they must return [`TrendOutcome::undefined`] when no finite
/// observation remains. The engine calls the test from several threads at
/// once.
pub trait TrendTest: Sync {
    /// Tests `series` for a monotonic trend.
    fn test(&self, series: &[(f64, f64)]) -> TrendOutcome;
}

impl<T: TrendTest + ?Sized> TrendTest for &T {
    fn test(&self, series: &[(f64, f64)]) -> TrendOutcome {
        (**self).test(series)
    }
}
