//! Raster decode boundary and daily grids.

use chrono::NaiveDate;
use ndarray::Array2;

use crate::axes::CoordinateAxes;
use crate::error::GridError;

/// Outer edges of a north-up raster, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Northern edge.
    pub top: f64,
    /// Western edge.
    pub left: f64,
    /// Eastern edge.
    pub right: f64,
    /// Southern edge.
    pub bottom: f64,
}

/// Cell size of a raster, in degrees. Both components are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Latitude cell height.
    pub lat_res: f64,
    /// Longitude cell width.
    pub lon_res: f64,
}

impl Resolution {
    /// Resolution implied by `bounds` and a raster of `n_rows x n_cols`.
    pub fn from_bounds(bounds: &Bounds, n_rows: usize, n_cols: usize) -> Self {
        Self {
            lat_res: (bounds.top - bounds.bottom) / n_rows as f64,
            lon_res: (bounds.right - bounds.left) / n_cols as f64,
        }
    }

    fn validate(&self) -> Result<(), GridError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.lat_res) || !ok(self.lon_res) {
            return Err(GridError::InvalidResolution {
                lat_res: self.lat_res,
                lon_res: self.lon_res,
            });
        }
        Ok(())
    }
}

/// A decoded single-band raster, as handed over by a format decoder.
///
/// Values are laid out `[row, col]` with row 0 at the top edge.
#[derive(Debug, Clone)]
pub struct RawRaster {
    values: Array2<f64>,
    bounds: Bounds,
    resolution: Resolution,
    nodata: Option<f64>,
}

impl RawRaster {
    /// Creates a raw raster.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidResolution`] if either cell size is not a
    /// positive finite number, or [`GridError::EmptyAxis`] if the array has
    /// no rows or columns.
    pub fn new(
        values: Array2<f64>,
        bounds: Bounds,
        resolution: Resolution,
        nodata: Option<f64>,
    ) -> Result<Self, GridError> {
        resolution.validate()?;
        let (rows, cols) = values.dim();
        if rows == 0 {
            return Err(GridError::EmptyAxis { axis: "lat" });
        }
        if cols == 0 {
            return Err(GridError::EmptyAxis { axis: "lon" });
        }
        Ok(Self {
            values,
            bounds,
            resolution,
            nodata,
        })
    }

    /// Raw values, sentinels included.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Outer edges.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Cell size.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Sentinel no-data value, if the format declares one.
    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Cell-centre axes derived from the bounds and resolution.
    pub fn axes(&self) -> CoordinateAxes {
        let (rows, cols) = self.shape();
        CoordinateAxes::from_bounds(&self.bounds, &self.resolution, rows, cols)
    }
}

/// One calendar day of precipitation depth (mm), indexed `[lat, lon]`.
///
/// Missing cells hold `NaN`.
#[derive(Debug, Clone)]
pub struct DailyGrid {
    date: NaiveDate,
    values: Array2<f64>,
}

impl DailyGrid {
    /// Creates a daily grid from already-cleaned values.
    pub fn new(date: NaiveDate, values: Array2<f64>) -> Self {
        Self { date, values }
    }

    /// Converts a raw raster, replacing the sentinel and any non-finite
    /// value with `NaN`.
    pub fn from_raw(date: NaiveDate, raw: RawRaster) -> Self {
        let nodata = raw.nodata;
        let mut values = raw.values;
        values.mapv_inplace(|v| {
            if !v.is_finite() || nodata.is_some_and(|nd| v == nd) {
                f64::NAN
            } else {
                v
            }
        });
        Self { date, values }
    }

    /// Calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Cell values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// `(n_lat, n_lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}
