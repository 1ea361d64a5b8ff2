//! Configuration for period comparison.

use wd50_grid::Region;

use crate::error::CompareError;

/// Settings for [`compare_segments`](crate::compare_segments).
///
/// # Example
///
/// ```
/// use wd50_compare::CompareConfig;
/// use wd50_grid::Region;
///
/// let california = Region::new(32.54, 42.0, -125.0, -113.05).unwrap();
/// let config = CompareConfig::new().with_region(california).with_floor(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompareConfig {
    region: Option<Region>,
    floor: Option<f64>,
}

impl CompareConfig {
    /// Whole grid, no floor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the comparison to a lat/lon box.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Excludes cells whose aggregate is not strictly above `floor` in
    /// either period.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Returns the region of interest, if any.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Returns the validity floor, if any.
    pub fn floor(&self) -> Option<f64> {
        self.floor
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Validation`] if the floor is negative or not
    /// finite.
    pub fn validate(&self) -> Result<(), CompareError> {
        match self.floor {
            Some(f) if !f.is_finite() || f < 0.0 => Err(CompareError::Validation {
                count: 1,
                details: format!("floor must be finite and >= 0, got {f}"),
            }),
            _ => Ok(()),
        }
    }
}
