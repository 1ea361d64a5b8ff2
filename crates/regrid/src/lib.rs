//! Multi-year assembly and regridding of annual metric grids.
//!
//! [`assemble`] stacks one metric of several [`AnnualMetricsGrid`]s into a
//! [`MultiYearGrid`] indexed `[year, lat, lon]` with ascending axes.
//! [`align_periods`] then puts a second period on the first period's axes,
//! using bilinear interpolation when the grids come from runs with a
//! different resolution or extent.
//!
//! [`AnnualMetricsGrid`]: wd50_metrics::AnnualMetricsGrid

mod align;
mod bilinear;
mod error;
mod multi_year;

pub use align::{AlignedPeriods, align_periods};
pub use bilinear::BilinearWeights;
pub use error::RegridError;
pub use multi_year::{AXES_TOL, MultiYearGrid, assemble};
