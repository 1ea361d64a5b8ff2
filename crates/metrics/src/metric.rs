//! Names and metadata of the five annual indices.

use std::fmt;
use std::str::FromStr;

use crate::error::MetricsError;

/// One of the five annual indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Days to half the wet-day total.
    Wd50,
    /// Wet-day total.
    Prcptot,
    /// Days above the percentile threshold.
    R95p,
    /// Depth above the percentile threshold.
    R95ptot,
    /// Share of the wet-day total above the percentile threshold.
    R95ptotFrac,
}

impl Metric {
    /// All metrics, in record order.
    pub const ALL: [Metric; 5] = [
        Metric::Wd50,
        Metric::Prcptot,
        Metric::R95p,
        Metric::R95ptot,
        Metric::R95ptotFrac,
    ];

    /// Variable name used in records and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wd50 => "wd50",
            Self::Prcptot => "prcptot",
            Self::R95p => "r95p",
            Self::R95ptot => "r95ptot",
            Self::R95ptotFrac => "r95ptot_frac",
        }
    }

    /// Units attribute.
    pub fn units(self) -> &'static str {
        match self {
            Self::Wd50 | Self::R95p => "days",
            Self::Prcptot | Self::R95ptot => "mm",
            Self::R95ptotFrac => "1",
        }
    }

    /// Long description attribute.
    pub fn description(self) -> &'static str {
        match self {
            Self::Wd50 => "number of wettest days accumulating half of the wet-day precipitation",
            Self::Prcptot => "total precipitation on wet days",
            Self::R95p => "number of wet days above the 95th percentile of the year's wet days",
            Self::R95ptot => "precipitation on wet days above the 95th percentile",
            Self::R95ptotFrac => "fraction of wet-day precipitation falling above the 95th percentile",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| MetricsError::UnknownMetric {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for m in Metric::ALL {
            assert_eq!(m.name().parse::<Metric>().unwrap(), m);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("WD50".parse::<Metric>().unwrap(), Metric::Wd50);
        assert_eq!(" R95pTOT_frac ".parse::<Metric>().unwrap(), Metric::R95ptotFrac);
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(
            "rx1day".parse::<Metric>(),
            Err(MetricsError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn units() {
        assert_eq!(Metric::Wd50.units(), "days");
        assert_eq!(Metric::Prcptot.units(), "mm");
    }
}
