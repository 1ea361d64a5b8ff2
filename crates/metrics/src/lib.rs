//! Annual precipitation-concentration indices per grid cell.
//!
//! For each cell of a [`WaterYearStack`](wd50_stack::WaterYearStack) the
//! daily series is first reduced to its wet days (finite values at or above
//! the wet-day threshold, 1.0 mm by default). Every index is computed from
//! that filtered series:
//!
//! - **WD50**: fewest wettest days reaching half of the wet-day total
//! - **PRCPTOT**: wet-day total
//! - **R95p / R95pTOT**: count / depth of wet days strictly above the cell's
//!   own 95th percentile (linear interpolation)
//! - **R95pTOT_frac**: `R95pTOT / PRCPTOT`, missing when `PRCPTOT` is zero
//!
//! A cell with no wet days has a missing WD50 and fraction, and zero for
//! the other three indices.
//!
//! # Quick Start
//!
//! ```
//! use wd50_metrics::{CellMetrics, MetricsConfig};
//!
//! let m = CellMetrics::from_series([0.0, 2.0, 5.0], &MetricsConfig::new());
//! assert_eq!(m.prcptot, 7.0);
//! assert_eq!(m.wd50, 1.0);
//! ```

mod annual;
mod config;
mod engine;
mod error;
mod metric;
mod series;

pub use annual::AnnualMetricsGrid;
pub use config::MetricsConfig;
pub use engine::compute_annual_metrics;
pub use error::MetricsError;
pub use metric::Metric;
pub use series::{CellMetrics, Exceedance, exceedance, prcptot, wd50, wet_days};
