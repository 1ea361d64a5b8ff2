//! Applying a trend test to every cell of a multi-year grid.

use ndarray::Array2;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, info_span};
use wd50_grid::CoordinateAxes;
use wd50_metrics::Metric;
use wd50_regrid::MultiYearGrid;

use crate::method::TrendTest;
use crate::outcome::{TrendClass, TrendOutcome};

/// Per-cell trend outcomes of one metric over a year range.
#[derive(Debug, Clone)]
pub struct TrendGrid {
    metric: Metric,
    years: Vec<i32>,
    axes: CoordinateAxes,
    class: Array2<TrendClass>,
    p_value: Array2<f64>,
    slope: Array2<f64>,
}

impl TrendGrid {
    /// Metric that was tested.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Years the series covered.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Coordinate axes.
    pub fn axes(&self) -> &CoordinateAxes {
        &self.axes
    }

    /// Trend class per cell.
    pub fn class(&self) -> &Array2<TrendClass> {
        &self.class
    }

    /// Two-sided p-value per cell.
    pub fn p_value(&self) -> &Array2<f64> {
        &self.p_value
    }

    /// Slope per cell, in metric units per year.
    pub fn slope(&self) -> &Array2<f64> {
        &self.slope
    }

    /// Outcome at one cell.
    pub fn outcome(&self, row: usize, col: usize) -> TrendOutcome {
        TrendOutcome {
            class: self.class[[row, col]],
            p_value: self.p_value[[row, col]],
            slope: self.slope[[row, col]],
        }
    }

    /// Number of cells with no finite year.
    pub fn undefined_count(&self) -> usize {
        self.class
            .iter()
            .filter(|&&c| c == TrendClass::Undefined)
            .count()
    }

    /// Counts of tested and significant cells at `cutoff`.
    pub fn summary(&self, cutoff: f64) -> TrendSummary {
        let mut s = TrendSummary {
            cutoff,
            cells: self.class.len(),
            ..TrendSummary::default()
        };
        for (&class, &p) in self.class.iter().zip(self.p_value.iter()) {
            if class == TrendClass::Undefined {
                s.undefined += 1;
                continue;
            }
            s.tested += 1;
            if p < cutoff {
                s.significant += 1;
                if class == TrendClass::Increasing {
                    s.significant_increasing += 1;
                } else if class == TrendClass::Decreasing {
                    s.significant_decreasing += 1;
                }
            }
        }
        s
    }
}

/// Cell counts of a trend grid at a significance cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrendSummary {
    pub cutoff: f64,
    pub cells: usize,
    pub undefined: usize,
    pub tested: usize,
    pub significant: usize,
    pub significant_increasing: usize,
    pub significant_decreasing: usize,
}

/// Runs `test` on the year series of every cell of `grid`.
///
/// A cell whose years are all missing is undefined without calling the
/// test; otherwise the test receives that cell's finite `(year, value)`
/// pairs. Cells are processed in parallel.
pub fn apply_trend<T: TrendTest>(grid: &MultiYearGrid, test: &T) -> TrendGrid {
    let _span = info_span!("trend", metric = %grid.metric()).entered();
    let (n_lat, n_lon) = grid.axes().shape();
    let years: Vec<f64> = grid.years().iter().map(|&y| f64::from(y)).collect();

    let outcomes: Vec<TrendOutcome> = (0..n_lat * n_lon)
        .into_par_iter()
        .map(|idx| {
            let pairs: Vec<(f64, f64)> = years
                .iter()
                .zip(grid.cell_series(idx / n_lon, idx % n_lon).iter())
                .filter(|(_, v)| v.is_finite())
                .map(|(&t, &v)| (t, v))
                .collect();
            if pairs.is_empty() {
                TrendOutcome::undefined()
            } else {
                test.test(&pairs)
            }
        })
        .collect();

    let at = |i: usize, j: usize| &outcomes[i * n_lon + j];
    let trend = TrendGrid {
        metric: grid.metric(),
        years: grid.years().to_vec(),
        axes: grid.axes().clone(),
        class: Array2::from_shape_fn((n_lat, n_lon), |(i, j)| at(i, j).class),
        p_value: Array2::from_shape_fn((n_lat, n_lon), |(i, j)| at(i, j).p_value),
        slope: Array2::from_shape_fn((n_lat, n_lon), |(i, j)| at(i, j).slope),
    };
    info!(
        cells = trend.class.len(),
        undefined = trend.undefined_count(),
        "trend test applied"
    );
    trend
}
