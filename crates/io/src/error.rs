//! Error types for wd50-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the wd50-io crate.
///
/// Covers file-system failures, NetCDF and CSV format errors, malformed
/// records and grids that violate the metric or grid invariants on load.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file or directory does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps a file-system error.
    #[error("i/o error: {0}")]
    Fs(#[from] std::io::Error),

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a record's content is malformed.
    #[error("invalid record {}: {reason}", path.display())]
    InvalidRecord {
        /// Offending file.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Returned when no record exists for a requested water year.
    #[error("no record for water year {year} in {}", dir.display())]
    MissingYear {
        /// Requested water year.
        year: i32,
        /// Archive directory.
        dir: PathBuf,
    },

    /// Returned when stored coordinates are not valid axes.
    #[error("grid error: {0}")]
    Grid(#[from] wd50_grid::GridError),

    /// Returned when stored layers do not form a valid annual grid.
    #[error("metrics error: {0}")]
    Metrics(#[from] wd50_metrics::MetricsError),
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}
