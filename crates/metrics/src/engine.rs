//! Parallel per-cell computation over a water-year stack.

use rayon::prelude::*;
use tracing::{info, info_span};
use wd50_stack::WaterYearStack;

use crate::annual::AnnualMetricsGrid;
use crate::config::MetricsConfig;
use crate::error::MetricsError;
use crate::series::CellMetrics;

/// Computes the five indices for every cell of `stack`.
///
/// Cells are independent: each worker reads one cell's daily series and
/// produces that cell's result, and results are collected in row-major
/// order.
///
/// # Errors
///
/// Returns [`MetricsError::Validation`] for an invalid `config`.
pub fn compute_annual_metrics(
    stack: &WaterYearStack,
    config: &MetricsConfig,
) -> Result<AnnualMetricsGrid, MetricsError> {
    config.validate()?;
    let _span = info_span!("metrics", wy = stack.water_year()).entered();

    let n_lon = stack.axes().n_lon();
    let cells: Vec<CellMetrics> = (0..stack.axes().n_cells())
        .into_par_iter()
        .map(|idx| {
            let series = stack.cell_series(idx / n_lon, idx % n_lon);
            CellMetrics::from_series(series.iter().copied(), config)
        })
        .collect();

    let grid = AnnualMetricsGrid::from_cells(stack.water_year(), stack.axes().clone(), &cells);
    info!(
        days = stack.n_days(),
        cells = cells.len(),
        wet_cells = grid.wet_cell_count(),
        "annual metrics computed"
    );
    Ok(grid)
}
