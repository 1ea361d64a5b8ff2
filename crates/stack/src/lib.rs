//! # wd50-stack
//!
//! Builds one water year's time-ordered stack of daily precipitation grids
//! from an external [`DailyGridSource`].
//!
//! ```text
//! build_water_year_stack()
//!   ├─ WaterYear::dates()             (Oct 1 y-1 .. Sep 30 y)
//!   └─ for each date
//!        ├─ WorkArea::new()            (scratch dir on first use, removed on drop)
//!        ├─ source.fetch()             (Unavailable / Decode → skip day)
//!        ├─ first success fixes CoordinateAxes
//!        └─ DailyGrid::from_raw()      (sentinel → NaN)
//! ```
//!
//! A year built from a strict subset of its days is normal. A year with
//! no retrievable days yields [`StackOutcome::Empty`], which callers treat
//! as a skipped year rather than a failure.

mod config;
mod error;
mod source;
mod stack;
mod work_area;

pub use config::StackConfig;
pub use error::{SourceError, StackError};
pub use source::DailyGridSource;
pub use stack::{StackOutcome, StackReport, WaterYearStack, build_water_year_stack};
pub use work_area::WorkArea;
