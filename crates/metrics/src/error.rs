//! Error types for wd50-metrics.

/// Errors from metric configuration and annual grid construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// Invalid [`MetricsConfig`](crate::MetricsConfig).
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of failed checks.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// A metric layer does not match the shape of the grid's axes.
    #[error("layer {metric} has shape {got:?}, axes have shape {expected:?}")]
    ShapeMismatch {
        /// Metric name of the offending layer.
        metric: &'static str,
        /// Shape of the coordinate axes.
        expected: (usize, usize),
        /// Shape of the layer.
        got: (usize, usize),
    },

    /// A metric name that is not one of the five annual indices.
    #[error("unknown metric '{name}' (expected one of wd50, prcptot, r95p, r95ptot, r95ptot_frac)")]
    UnknownMetric {
        /// The name as given.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let e = MetricsError::Validation {
            count: 2,
            details: "a; b".to_string(),
        };
        assert_eq!(e.to_string(), "2 validation error(s): a; b");
    }

    #[test]
    fn display_shape_mismatch() {
        let e = MetricsError::ShapeMismatch {
            metric: "prcptot",
            expected: (3, 4),
            got: (4, 3),
        };
        assert_eq!(
            e.to_string(),
            "layer prcptot has shape (4, 3), axes have shape (3, 4)"
        );
    }

    #[test]
    fn display_unknown_metric() {
        let e = MetricsError::UnknownMetric {
            name: "sdii".to_string(),
        };
        assert!(e.to_string().starts_with("unknown metric 'sdii'"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<MetricsError>();
    }
}
