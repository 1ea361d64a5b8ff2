//! Cell-centre coordinate axes of a rectilinear grid.

use crate::error::GridError;
use crate::raster::{Bounds, Resolution};

/// Latitude and longitude cell-centre sequences of a rectilinear grid.
///
/// Each axis is strictly monotonic, either ascending or descending. Once
/// built, axes are never mutated; reorientation produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxes {
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl CoordinateAxes {
    /// Creates axes from explicit coordinate sequences.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if either axis is empty, contains a non-finite
    /// value, or is not strictly monotonic.
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Result<Self, GridError> {
        validate_axis("lat", &lat)?;
        validate_axis("lon", &lon)?;
        Ok(Self { lat, lon })
    }

    /// Derives cell-centre axes from raster bounds and resolution.
    ///
    /// Latitudes run from the top edge downwards, longitudes from the left
    /// edge eastwards, matching the row/column order of a north-up raster.
    pub fn from_bounds(bounds: &Bounds, resolution: &Resolution, n_lat: usize, n_lon: usize) -> Self {
        let lat = (0..n_lat)
            .map(|i| bounds.top - (i as f64 + 0.5) * resolution.lat_res)
            .collect();
        let lon = (0..n_lon)
            .map(|j| bounds.left + (j as f64 + 0.5) * resolution.lon_res)
            .collect();
        Self { lat, lon }
    }

    /// Latitude cell centres.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitude cell centres.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Number of latitude rows.
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude columns.
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// `(n_lat, n_lon)`, the shape of every array on these axes.
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Total number of cells.
    pub fn n_cells(&self) -> usize {
        self.lat.len() * self.lon.len()
    }

    /// Returns `true` if latitudes increase with row index.
    pub fn lat_ascending(&self) -> bool {
        is_ascending(&self.lat)
    }

    /// Returns `true` if longitudes increase with column index.
    pub fn lon_ascending(&self) -> bool {
        is_ascending(&self.lon)
    }

    /// Axes with the latitude order reversed.
    pub fn reversed_lat(&self) -> Self {
        let mut lat = self.lat.clone();
        lat.reverse();
        Self {
            lat,
            lon: self.lon.clone(),
        }
    }

    /// Axes with the longitude order reversed.
    pub fn reversed_lon(&self) -> Self {
        let mut lon = self.lon.clone();
        lon.reverse();
        Self {
            lat: self.lat.clone(),
            lon,
        }
    }

    /// Checks that an array of `shape` can live on these axes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if the shapes differ.
    pub fn check_shape(&self, shape: (usize, usize)) -> Result<(), GridError> {
        if shape != self.shape() {
            return Err(GridError::ShapeMismatch {
                expected: self.shape(),
                got: shape,
            });
        }
        Ok(())
    }

    /// Returns `true` if both axes have the same length and every coordinate
    /// differs by at most `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        fn close(a: &[f64], b: &[f64], tol: f64) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol)
        }
        close(&self.lat, &other.lat, tol) && close(&self.lon, &other.lon, tol)
    }

    /// `(row, col)` of the cell centre nearest to `(lat, lon)`.
    pub fn nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        (nearest(&self.lat, lat), nearest(&self.lon, lon))
    }
}

fn validate_axis(name: &'static str, values: &[f64]) -> Result<(), GridError> {
    if values.is_empty() {
        return Err(GridError::EmptyAxis { axis: name });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(GridError::NonFiniteCoordinate { axis: name, index });
    }
    if values.len() < 2 {
        return Ok(());
    }
    let ascending = values[1] > values[0];
    for (i, pair) in values.windows(2).enumerate() {
        let ok = if ascending {
            pair[1] > pair[0]
        } else {
            pair[1] < pair[0]
        };
        if !ok {
            return Err(GridError::NonMonotonicAxis {
                axis: name,
                index: i + 1,
            });
        }
    }
    Ok(())
}

fn is_ascending(values: &[f64]) -> bool {
    values.len() < 2 || values[values.len() - 1] > values[0]
}

fn nearest(values: &[f64], target: f64) -> usize {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (*a - target)
                .abs()
                .partial_cmp(&(*b - target).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
