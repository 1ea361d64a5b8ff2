//! Configuration for water-year stack building.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::StackError;

/// Immutable settings for [`build_water_year_stack`](crate::build_water_year_stack).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wd50_stack::StackConfig;
///
/// let config = StackConfig::new("ppt")
///     .with_request_interval(Duration::from_millis(250));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Source variable name (e.g. `ppt`).
    variable: String,
    /// First month of the water year.
    start_month: u8,
    /// Parent directory for per-day work areas; system temp when `None`.
    work_root: Option<PathBuf>,
    /// Minimum spacing between consecutive source requests.
    request_interval: Duration,
}

impl StackConfig {
    /// Creates a configuration for `variable`.
    ///
    /// Defaults: October start, system temp work areas, no request spacing.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            start_month: 10,
            work_root: None,
            request_interval: Duration::ZERO,
        }
    }

    /// Sets the first month of the water year.
    pub fn with_start_month(mut self, month: u8) -> Self {
        self.start_month = month;
        self
    }

    /// Sets the parent directory for per-day work areas.
    pub fn with_work_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.work_root = Some(root.into());
        self
    }

    /// Sets the minimum spacing between consecutive source requests.
    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    /// Returns the source variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the first month of the water year.
    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    /// Returns the work-area parent directory, if set.
    pub fn work_root(&self) -> Option<&Path> {
        self.work_root.as_deref()
    }

    /// Returns the minimum spacing between requests.
    pub fn request_interval(&self) -> Duration {
        self.request_interval
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Validation`] listing every failed check.
    pub fn validate(&self) -> Result<(), StackError> {
        let mut problems = Vec::new();
        if self.variable.trim().is_empty() {
            problems.push("variable must not be empty".to_string());
        }
        if !(1..=12).contains(&self.start_month) {
            problems.push(format!(
                "start_month must be 1..=12, got {}",
                self.start_month
            ));
        }
        if let Some(root) = &self.work_root {
            if !root.is_dir() {
                problems.push(format!("work_root {} is not a directory", root.display()));
            }
        }
        if problems.is_empty() {
            return Ok(());
        }
        Err(StackError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}
