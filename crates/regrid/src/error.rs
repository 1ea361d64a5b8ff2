//! Error types for wd50-regrid.

use wd50_grid::GridError;

/// Errors from multi-year assembly and regridding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegridError {
    /// No annual grids were supplied.
    #[error("no annual grids to assemble")]
    Empty,

    /// The same water year was supplied twice.
    #[error("water year {year} appears more than once")]
    DuplicateYear {
        /// The repeated year.
        year: i32,
    },

    /// A values array does not match its years and axes.
    #[error("values have shape {got:?}, expected {expected:?} (years, lat, lon)")]
    ShapeMismatch {
        /// Shape implied by the years and axes.
        expected: (usize, usize, usize),
        /// Actual shape.
        got: (usize, usize, usize),
    },

    /// Two periods hold different metrics.
    #[error("cannot align {left} with {right}")]
    MetricMismatch {
        /// Metric of the reference period.
        left: &'static str,
        /// Metric of the other period.
        right: &'static str,
    },

    /// A region box selects no cells of the grid.
    #[error("region selects no cells ({n_lat} rows, {n_lon} columns)")]
    EmptyRegion {
        /// Rows inside the box.
        n_lat: usize,
        /// Columns inside the box.
        n_lon: usize,
    },

    /// Invalid axes.
    #[error(transparent)]
    Grid(#[from] GridError),
}
