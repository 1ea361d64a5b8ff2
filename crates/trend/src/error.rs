//! Error types for wd50-trend.

/// Errors from trend test construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    /// Significance level outside (0, 1).
    #[error("alpha must be in (0, 1), got {alpha}")]
    InvalidAlpha {
        /// The rejected value.
        alpha: f64,
    },

    /// The reference distribution could not be constructed.
    ///
    /// The `message` field is a `String` because statrs errors do not
    /// implement `Clone`.
    #[error("distribution construction failed: {message}")]
    Distribution {
        /// Description of the failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_alpha() {
        let e = TrendError::InvalidAlpha { alpha: 1.5 };
        assert_eq!(e.to_string(), "alpha must be in (0, 1), got 1.5");
    }

    #[test]
    fn display_distribution() {
        let e = TrendError::Distribution {
            message: "bad std_dev".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "distribution construction failed: bad std_dev"
        );
    }
}
