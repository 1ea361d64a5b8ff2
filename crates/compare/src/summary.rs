//! Distribution summaries of a masked cell population.

use serde::Serialize;
use wd50_stats::{finite_sorted, mean, median, quantile_type7};

/// Count and distribution of one population of cell values.
///
/// `missing` counts the non-finite entries; every other field is computed
/// over the finite ones and is `NaN` (serialised as `null`) when there are
/// none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub missing: usize,
    pub min: f64,
    pub p05: f64,
    pub median: f64,
    pub mean: f64,
    pub p95: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarises `values`.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut total = 0usize;
        let sorted = finite_sorted(values.into_iter().inspect(|_| total += 1));
        let missing = total - sorted.len();
        if sorted.is_empty() {
            return Self {
                count: 0,
                missing,
                min: f64::NAN,
                p05: f64::NAN,
                median: f64::NAN,
                mean: f64::NAN,
                p95: f64::NAN,
                max: f64::NAN,
            };
        }
        Self {
            count: sorted.len(),
            missing,
            min: sorted[0],
            p05: quantile_type7(&sorted, 0.05),
            median: median(&sorted),
            mean: mean(&sorted),
            p95: quantile_type7(&sorted, 0.95),
            max: sorted[sorted.len() - 1],
        }
    }
}
