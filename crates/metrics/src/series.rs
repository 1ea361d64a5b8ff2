//! Index definitions over a single cell's daily series.
//!
//! Every function except [`wet_days`] expects an already filtered wet-day
//! series: finite values at or above the wet-day threshold, in any order.

use wd50_stats::{quantile_type7, total_cmp_asc};

use crate::config::MetricsConfig;
use crate::metric::Metric;

/// Keeps the finite values at or above `threshold` (mm), in input order.
///
/// Missing days and dry days are dropped entirely, so every index is
/// computed over wet days only.
pub fn wet_days(series: impl IntoIterator<Item = f64>, threshold: f64) -> Vec<f64> {
    series
        .into_iter()
        .filter(|v| v.is_finite() && *v >= threshold)
        .collect()
}

/// Minimum number of the wettest days whose combined depth reaches half of
/// the wet-day total.
///
/// Computed as the count of leading entries of the descending cumulative sum
/// that stay strictly below `total / 2`, plus one. `NaN` for an empty
/// series.
///
/// ```
/// use wd50_metrics::wd50;
///
/// assert_eq!(wd50(&[2.0, 10.0, 6.0, 4.0, 8.0]), 2.0);
/// assert!(wd50(&[]).is_nan());
/// ```
pub fn wd50(wet: &[f64]) -> f64 {
    if wet.is_empty() {
        return f64::NAN;
    }
    let mut desc = wet.to_vec();
    desc.sort_by(|a, b| total_cmp_asc(b, a));

    let half = desc.iter().sum::<f64>() / 2.0;
    let mut cumulative = 0.0;
    let mut below = 0usize;
    for v in &desc {
        cumulative += v;
        if cumulative < half {
            below += 1;
        } else {
            break;
        }
    }
    (below + 1) as f64
}

/// Total wet-day precipitation (mm). Zero for an empty series.
pub fn prcptot(wet: &[f64]) -> f64 {
    wet.iter().sum()
}

/// Days above a cell's own percentile threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exceedance {
    /// Percentile of the wet-day series; `NaN` when there are no wet days.
    pub threshold: f64,
    /// Number of days strictly above `threshold`.
    pub count: usize,
    /// Sum of the values strictly above `threshold` (mm).
    pub total: f64,
}

/// Counts and sums the wet days strictly above the `percentile`-th
/// percentile (linear interpolation) of the same series.
pub fn exceedance(wet: &[f64], percentile: f64) -> Exceedance {
    if wet.is_empty() {
        return Exceedance {
            threshold: f64::NAN,
            count: 0,
            total: 0.0,
        };
    }
    let mut sorted = wet.to_vec();
    sorted.sort_by(total_cmp_asc);
    let threshold = quantile_type7(&sorted, percentile / 100.0);

    let (count, total) = wet
        .iter()
        .filter(|v| **v > threshold)
        .fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    Exceedance {
        threshold,
        count,
        total,
    }
}

/// The five annual indices of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Days to half the wet-day total; `NaN` without wet days.
    pub wd50: f64,
    /// Wet-day total (mm).
    pub prcptot: f64,
    /// Days above the percentile threshold.
    pub r95p: f64,
    /// Depth on days above the percentile threshold (mm).
    pub r95ptot: f64,
    /// `r95ptot / prcptot`; `NaN` when `prcptot` is zero.
    pub r95ptot_frac: f64,
}

impl CellMetrics {
    /// Computes all indices from a raw daily series, applying the wet-day
    /// filter of `config` first.
    pub fn from_series(series: impl IntoIterator<Item = f64>, config: &MetricsConfig) -> Self {
        let wet = wet_days(series, config.wet_day_threshold());
        Self::from_wet_days(&wet, config.percentile())
    }

    /// Computes all indices from an already filtered wet-day series.
    pub fn from_wet_days(wet: &[f64], percentile: f64) -> Self {
        let prcptot = prcptot(wet);
        let ex = exceedance(wet, percentile);
        let r95ptot_frac = if prcptot > 0.0 {
            ex.total / prcptot
        } else {
            f64::NAN
        };
        Self {
            wd50: wd50(wet),
            prcptot,
            r95p: ex.count as f64,
            r95ptot: ex.total,
            r95ptot_frac,
        }
    }

    /// Value of one index.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Wd50 => self.wd50,
            Metric::Prcptot => self.prcptot,
            Metric::R95p => self.r95p,
            Metric::R95ptot => self.r95ptot,
            Metric::R95ptotFrac => self.r95ptot_frac,
        }
    }

    /// Whether the cell had at least one wet day.
    pub fn has_wet_days(&self) -> bool {
        !self.wd50.is_nan()
    }
}
