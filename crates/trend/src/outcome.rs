//! Trend classification of one series.

/// Direction of a monotonic trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendClass {
    /// Significant upward trend.
    Increasing,
    /// Significant downward trend.
    Decreasing,
    /// No significant trend.
    NoTrend,
    /// No observations to test.
    Undefined,
}

impl TrendClass {
    /// Compact code used in trend records.
    pub fn code(self) -> i8 {
        match self {
            Self::Increasing => 1,
            Self::Decreasing => -1,
            Self::NoTrend => 0,
            Self::Undefined => Self::UNDEFINED_CODE,
        }
    }

    /// Code written for [`TrendClass::Undefined`].
    pub const UNDEFINED_CODE: i8 = -127;

    /// Inverse of [`code`](Self::code); unknown codes map to `Undefined`.
    pub fn from_code(code: i8) -> Self {
        match code {
            1 => Self::Increasing,
            -1 => Self::Decreasing,
            0 => Self::NoTrend,
            _ => Self::Undefined,
        }
    }

    /// Lowercase name, as in `increasing` or `no_trend`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::NoTrend => "no_trend",
            Self::Undefined => "undefined",
        }
    }
}

/// Result of a trend test on one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendOutcome {
    /// Classification.
    pub class: TrendClass,
    /// Two-sided p-value; `NaN` when undefined.
    pub p_value: f64,
    /// Slope estimate in metric units per year; `NaN` when undefined.
    pub slope: f64,
}

impl TrendOutcome {
    /// Outcome for a series without observations.
    pub fn undefined() -> Self {
        Self {
            class: TrendClass::Undefined,
            p_value: f64::NAN,
            slope: f64::NAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for c in [
            TrendClass::Increasing,
            TrendClass::Decreasing,
            TrendClass::NoTrend,
            TrendClass::Undefined,
        ] {
            assert_eq!(TrendClass::from_code(c.code()), c);
        }
        assert_eq!(TrendClass::from_code(42), TrendClass::Undefined);
    }

    #[test]
    fn undefined_outcome_is_missing() {
        let o = TrendOutcome::undefined();
        assert_eq!(o.class, TrendClass::Undefined);
        assert!(o.p_value.is_nan());
        assert!(o.slope.is_nan());
    }
}
