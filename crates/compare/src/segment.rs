//! Two-period comparison on a shared grid.

use ndarray::Array2;
use tracing::{info, info_span};
use wd50_grid::CoordinateAxes;
use wd50_metrics::Metric;
use wd50_regrid::{AXES_TOL, MultiYearGrid};

use crate::aggregate::temporal_median;
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::mask::{difference, percent_change, validity_mask};
use crate::summary::SummaryStats;

/// Per-cell aggregates of two periods and the change between them.
///
/// All arrays share [`axes`](Self::axes). Cells outside the mask are `NaN`
/// in `difference` and `percent_change`.
#[derive(Debug, Clone)]
pub struct SegmentComparison {
    pub metric: Metric,
    pub earlier_years: Vec<i32>,
    pub later_years: Vec<i32>,
    pub axes: CoordinateAxes,
    pub earlier_median: Array2<f64>,
    pub later_median: Array2<f64>,
    pub mask: Array2<bool>,
    pub difference: Array2<f64>,
    pub percent_change: Array2<f64>,
}

impl SegmentComparison {
    /// Number of cells in the compared domain.
    pub fn n_cells(&self) -> usize {
        self.mask.len()
    }

    /// Number of cells valid in both periods.
    pub fn n_valid(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Summary of the earlier aggregate over every cell of the domain.
    ///
    /// `missing` counts the cells with no finite year in that period.
    pub fn earlier_stats(&self) -> SummaryStats {
        SummaryStats::from_values(self.earlier_median.iter().copied())
    }

    /// Summary of the later aggregate over every cell of the domain.
    pub fn later_stats(&self) -> SummaryStats {
        SummaryStats::from_values(self.later_median.iter().copied())
    }

    /// Summary of the difference over the masked cells.
    pub fn difference_stats(&self) -> SummaryStats {
        self.masked_stats(&self.difference)
    }

    /// Summary of the percent change over the masked cells.
    pub fn percent_change_stats(&self) -> SummaryStats {
        self.masked_stats(&self.percent_change)
    }

    fn masked_stats(&self, values: &Array2<f64>) -> SummaryStats {
        SummaryStats::from_values(
            values
                .iter()
                .zip(self.mask.iter())
                .filter(|(_, m)| **m)
                .map(|(v, _)| *v),
        )
    }
}

/// Compares two aligned periods of one metric.
///
/// Each period is reduced to its per-cell temporal median; the mask keeps
/// cells finite in both (and above the floor in both, if configured).
///
/// # Errors
///
/// Returns [`CompareError::AxesMismatch`] if the periods are not on the same
/// axes (run [`align_periods`](wd50_regrid::align_periods) first),
/// [`CompareError::MetricMismatch`] for different metrics, and
/// [`CompareError::Region`] if the region selects no cells.
pub fn compare_segments(
    earlier: &MultiYearGrid,
    later: &MultiYearGrid,
    config: &CompareConfig,
) -> Result<SegmentComparison, CompareError> {
    config.validate()?;
    if earlier.metric() != later.metric() {
        return Err(CompareError::MetricMismatch {
            earlier: earlier.metric().name(),
            later: later.metric().name(),
        });
    }
    if !earlier.axes().approx_eq(later.axes(), AXES_TOL) {
        return Err(CompareError::AxesMismatch {
            earlier: earlier.axes().shape(),
            later: later.axes().shape(),
        });
    }
    let _span = info_span!("compare", metric = %earlier.metric()).entered();

    let (earlier, later) = match config.region() {
        Some(region) => (earlier.subset(region)?, later.subset(region)?),
        None => (earlier.clone(), later.clone()),
    };

    let earlier_median = temporal_median(&earlier);
    let later_median = temporal_median(&later);
    let mask = validity_mask(&earlier_median, &later_median, config.floor());
    let difference = difference(&earlier_median, &later_median, &mask);
    let percent_change = percent_change(&earlier_median, &later_median, &mask);

    let comparison = SegmentComparison {
        metric: earlier.metric(),
        earlier_years: earlier.years().to_vec(),
        later_years: later.years().to_vec(),
        axes: earlier.axes().clone(),
        earlier_median,
        later_median,
        mask,
        difference,
        percent_change,
    };
    info!(
        cells = comparison.n_cells(),
        valid = comparison.n_valid(),
        earlier_years = comparison.earlier_years.len(),
        later_years = comparison.later_years.len(),
        "segments compared"
    );
    Ok(comparison)
}
