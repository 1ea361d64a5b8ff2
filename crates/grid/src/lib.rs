//! # wd50-grid
//!
//! Rectilinear latitude/longitude grid model shared by every stage of the
//! pipeline.
//!
//! Raw rasters enter through [`RawRaster`], the parsed tuple handed over by
//! whatever decodes the on-disk format: a 2-D value array, the outer
//! [`Bounds`], the cell [`Resolution`] and the sentinel no-data value.
//! [`DailyGrid::from_raw`] converts sentinels to `NaN`, the workspace-wide
//! missing marker, and [`RawRaster::axes`] derives cell-centre
//! [`CoordinateAxes`]:
//!
//! ```text
//! lat_center[i] = top  - (i + 0.5) * lat_res
//! lon_center[j] = left + (j + 0.5) * lon_res
//! ```
//!
//! Grid arrays are always indexed `[lat, lon]`.

mod axes;
mod error;
mod raster;
mod region;

pub use axes::CoordinateAxes;
pub use error::GridError;
pub use raster::{Bounds, DailyGrid, RawRaster, Resolution};
pub use region::Region;
