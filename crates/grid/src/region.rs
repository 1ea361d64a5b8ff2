//! Rectangular latitude/longitude regions of interest.

use crate::axes::CoordinateAxes;
use crate::error::GridError;

/// An inclusive lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl Region {
    /// Creates a region from its edges.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRegion`] if any edge is non-finite or a
    /// minimum exceeds its maximum.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Result<Self, GridError> {
        if ![lat_min, lat_max, lon_min, lon_max].iter().all(|v| v.is_finite()) {
            return Err(GridError::InvalidRegion {
                reason: "edges must be finite".to_string(),
            });
        }
        if lat_min > lat_max {
            return Err(GridError::InvalidRegion {
                reason: format!("lat_min {lat_min} > lat_max {lat_max}"),
            });
        }
        if lon_min > lon_max {
            return Err(GridError::InvalidRegion {
                reason: format!("lon_min {lon_min} > lon_max {lon_max}"),
            });
        }
        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    /// Southern edge.
    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    /// Northern edge.
    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    /// Western edge.
    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    /// Eastern edge.
    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// Returns `true` if the point lies inside or on the box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }

    /// Row indices of `axes` whose latitude falls inside the box, in axis order.
    pub fn lat_indices(&self, axes: &CoordinateAxes) -> Vec<usize> {
        inside(axes.lat(), self.lat_min, self.lat_max)
    }

    /// Column indices of `axes` whose longitude falls inside the box, in axis order.
    pub fn lon_indices(&self, axes: &CoordinateAxes) -> Vec<usize> {
        inside(axes.lon(), self.lon_min, self.lon_max)
    }
}

fn inside(values: &[f64], lo: f64, hi: f64) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| (lo..=hi).contains(*v))
        .map(|(i, _)| i)
        .collect()
}
