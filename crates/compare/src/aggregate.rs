//! Temporal and spatial reductions of a multi-year grid.

use ndarray::Array2;
use rayon::prelude::*;
use serde::Serialize;
use wd50_regrid::MultiYearGrid;
use wd50_stats::nan_median;

/// Per-cell median across years, skipping missing years.
///
/// A cell is `NaN` only when every year is missing there.
pub fn temporal_median(grid: &MultiYearGrid) -> Array2<f64> {
    let shape = grid.axes().shape();
    let n_lon = shape.1;
    let cells: Vec<f64> = (0..grid.axes().n_cells())
        .into_par_iter()
        .map(|idx| nan_median(grid.cell_series(idx / n_lon, idx % n_lon).iter().copied()))
        .collect();
    Array2::from_shape_fn(shape, |(i, j)| cells[i * n_lon + j])
}

/// A value attached to a water year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Domain-wide median of each year, skipping missing cells.
pub fn spatial_median_series(grid: &MultiYearGrid) -> Vec<YearValue> {
    grid.years()
        .iter()
        .enumerate()
        .map(|(k, &year)| YearValue {
            year,
            value: nan_median(grid.layer(k).iter().copied()),
        })
        .collect()
}
