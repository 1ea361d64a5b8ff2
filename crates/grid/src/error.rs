//! Error types for wd50-grid.

/// Error type for grid construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A coordinate axis has no entries.
    #[error("{axis} axis is empty")]
    EmptyAxis {
        /// Axis name (`lat` or `lon`).
        axis: &'static str,
    },

    /// A coordinate axis is not strictly increasing or strictly decreasing.
    #[error("{axis} axis is not strictly monotonic at index {index}")]
    NonMonotonicAxis {
        /// Axis name (`lat` or `lon`).
        axis: &'static str,
        /// First index at which monotonicity breaks.
        index: usize,
    },

    /// A coordinate value is NaN or infinite.
    #[error("{axis} axis contains a non-finite value at index {index}")]
    NonFiniteCoordinate {
        /// Axis name (`lat` or `lon`).
        axis: &'static str,
        /// Index of the offending value.
        index: usize,
    },

    /// An array's shape does not match the axes it is paired with.
    #[error("shape mismatch: axes describe {expected:?}, array is {got:?}")]
    ShapeMismatch {
        /// `(n_lat, n_lon)` implied by the axes.
        expected: (usize, usize),
        /// Actual array shape.
        got: (usize, usize),
    },

    /// Resolution is zero, negative or non-finite.
    #[error("invalid resolution: lat_res={lat_res}, lon_res={lon_res}")]
    InvalidResolution {
        /// Latitude cell size.
        lat_res: f64,
        /// Longitude cell size.
        lon_res: f64,
    },

    /// Region bounds are inverted or non-finite.
    #[error("invalid region: {reason}")]
    InvalidRegion {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shape_mismatch() {
        let err = GridError::ShapeMismatch {
            expected: (3, 4),
            got: (4, 3),
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch: axes describe (3, 4), array is (4, 3)"
        );
    }

    #[test]
    fn display_non_monotonic() {
        let err = GridError::NonMonotonicAxis {
            axis: "lat",
            index: 2,
        };
        assert_eq!(err.to_string(), "lat axis is not strictly monotonic at index 2");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<GridError>();
    }
}
