//! Configuration for the metrics engine.

use crate::error::MetricsError;

/// Settings shared by every cell of an annual metrics computation.
///
/// # Example
///
/// ```
/// use wd50_metrics::MetricsConfig;
///
/// let config = MetricsConfig::new().with_wet_day_threshold(0.5);
/// assert_eq!(config.percentile(), 95.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsConfig {
    /// Values below this depth (mm) are removed before any metric.
    wet_day_threshold: f64,
    /// Percentile (0, 100] of the wet-day series used as the R95 threshold.
    percentile: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `wet_day_threshold = 1.0`, `percentile = 95.0`.
    pub fn new() -> Self {
        Self {
            wet_day_threshold: 1.0,
            percentile: 95.0,
        }
    }

    /// Sets the wet-day threshold in mm.
    pub fn with_wet_day_threshold(mut self, mm: f64) -> Self {
        self.wet_day_threshold = mm;
        self
    }

    /// Sets the exceedance percentile.
    pub fn with_percentile(mut self, p: f64) -> Self {
        self.percentile = p;
        self
    }

    /// Returns the wet-day threshold in mm.
    pub fn wet_day_threshold(&self) -> f64 {
        self.wet_day_threshold
    }

    /// Returns the exceedance percentile.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Validation`] listing every failed check.
    pub fn validate(&self) -> Result<(), MetricsError> {
        let mut problems = Vec::new();
        if !self.wet_day_threshold.is_finite() || self.wet_day_threshold < 0.0 {
            problems.push(format!(
                "wet_day_threshold must be finite and >= 0, got {}",
                self.wet_day_threshold
            ));
        }
        if !(self.percentile > 0.0 && self.percentile <= 100.0) {
            problems.push(format!(
                "percentile must be in (0, 100], got {}",
                self.percentile
            ));
        }
        if problems.is_empty() {
            return Ok(());
        }
        Err(MetricsError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MetricsConfig::new();
        assert_eq!(c.wet_day_threshold(), 1.0);
        assert_eq!(c.percentile(), 95.0);
        assert_eq!(c, MetricsConfig::default());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn collects_all_problems() {
        let c = MetricsConfig::new()
            .with_wet_day_threshold(f64::NAN)
            .with_percentile(0.0);
        match c.validate() {
            Err(MetricsError::Validation { count, details }) => {
                assert_eq!(count, 2);
                assert!(details.contains("wet_day_threshold"));
                assert!(details.contains("percentile"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn percentile_upper_bound_inclusive() {
        assert!(MetricsConfig::new().with_percentile(100.0).validate().is_ok());
        assert!(MetricsConfig::new().with_percentile(100.5).validate().is_err());
    }
}
