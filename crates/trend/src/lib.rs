//! Per-cell monotonic trend testing across water years.
//!
//! [`apply_trend`] runs a [`TrendTest`] on every cell's `(year, value)`
//! series of a [`MultiYearGrid`](wd50_regrid::MultiYearGrid). Cells with no
//! observations are [`TrendClass::Undefined`] with missing p-value and
//! slope. [`MannKendall`] is the default test; any other implementation of
//! the trait can be swapped in.
//!
//! Choosing a significance cutoff is left to the consumer:
//! [`TrendGrid::summary`] counts significant cells at a given cutoff.

mod engine;
mod error;
mod mann_kendall;
mod method;
mod outcome;

pub use engine::{TrendGrid, TrendSummary, apply_trend};
pub use error::TrendError;
pub use mann_kendall::MannKendall;
pub use method::TrendTest;
pub use outcome::{TrendClass, TrendOutcome};
