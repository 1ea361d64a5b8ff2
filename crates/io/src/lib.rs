//! # wd50-io
//!
//! NetCDF persistence for the wd50 pipeline and the file-backed inputs it
//! reads from.
//!
//! - Annual records: one `metrics_wy<year>.nc` per water year holding the
//!   five indices over `(lat, lon)`, written atomically and indexed by
//!   [`MetricsArchive`].
//! - Trend record: per-cell trend codes, p-values and slopes.
//! - [`NetcdfDailySource`]: a [`wd50_stack::DailyGridSource`] over local
//!   CF NetCDF files with a `time` axis in "days since" units.
//! - Station series: `date,value` CSV files.

mod annual;
mod archive;
mod daily;
mod error;
mod netcdf_read;
mod netcdf_write;
mod station;
mod trend;

pub use annual::{annual_file_name, parse_water_year, read_annual_metrics, write_annual_metrics};
pub use archive::{LoadedRange, MetricsArchive};
pub use daily::{DEFAULT_NODATA, NetcdfDailySource};
pub use error::IoError;
pub use station::read_station_csv;
pub use trend::write_trend_record;
