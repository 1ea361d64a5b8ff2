//! Mann-Kendall trend test with Sen's slope.

use statrs::distribution::{ContinuousCDF, Normal};
use wd50_stats::{median, total_cmp_asc};

use crate::error::TrendError;
use crate::method::TrendTest;
use crate::outcome::{TrendClass, TrendOutcome};

/// Original (non-seasonal) Mann-Kendall test.
///
/// The statistic `S` is the sum of signs of all later-minus-earlier value
/// differences. Its variance includes the correction for tied values, `z`
/// is continuity corrected and the p-value is two-sided under the normal
/// approximation. The slope is Sen's estimator: the median of all pairwise
/// slopes.
///
/// # Example
///
/// ```
/// use wd50_trend::{MannKendall, TrendClass, TrendTest};
///
/// let mk = MannKendall::new(0.05).unwrap();
/// let series: Vec<(f64, f64)> = (0..10).map(|k| (2000.0 + k as f64, k as f64)).collect();
/// assert_eq!(mk.test(&series).class, TrendClass::Increasing);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MannKendall {
    alpha: f64,
    normal: Normal,
}

impl MannKendall {
    /// Creates a test at significance level `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> Result<Self, TrendError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TrendError::InvalidAlpha { alpha });
        }
        let normal = Normal::new(0.0, 1.0).map_err(|e| TrendError::Distribution {
            message: e.to_string(),
        })?;
        Ok(Self { alpha, normal })
    }

    /// Significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl TrendTest for MannKendall {
    fn test(&self, series: &[(f64, f64)]) -> TrendOutcome {
        let mut obs: Vec<(f64, f64)> = series
            .iter()
            .copied()
            .filter(|(t, v)| t.is_finite() && v.is_finite())
            .collect();
        if obs.is_empty() {
            return TrendOutcome::undefined();
        }
        obs.sort_by(|a, b| total_cmp_asc(&a.0, &b.0));

        let s = s_statistic(&obs);
        let var = s_variance(&obs);
        let z = if var <= 0.0 {
            0.0
        } else if s > 0.0 {
            (s - 1.0) / var.sqrt()
        } else if s < 0.0 {
            (s + 1.0) / var.sqrt()
        } else {
            0.0
        };
        let p_value = 2.0 * (1.0 - self.normal.cdf(z.abs()));

        let class = if p_value < self.alpha && z > 0.0 {
            TrendClass::Increasing
        } else if p_value < self.alpha && z < 0.0 {
            TrendClass::Decreasing
        } else {
            TrendClass::NoTrend
        };
        TrendOutcome {
            class,
            p_value,
            slope: sens_slope(&obs),
        }
    }
}

fn s_statistic(obs: &[(f64, f64)]) -> f64 {
    let mut s = 0i64;
    for (i, &(_, a)) in obs.iter().enumerate() {
        for &(_, b) in &obs[i + 1..] {
            s += match b.partial_cmp(&a) {
                Some(std::cmp::Ordering::Greater) => 1,
                Some(std::cmp::Ordering::Less) => -1,
                _ => 0,
            };
        }
    }
    s as f64
}

/// Variance of `S` with the tie correction.
fn s_variance(obs: &[(f64, f64)]) -> f64 {
    let n = obs.len() as f64;
    let mut values: Vec<f64> = obs.iter().map(|&(_, v)| v).collect();
    values.sort_by(total_cmp_asc);

    let mut ties = 0.0;
    let mut start = 0;
    while start < values.len() {
        let mut end = start + 1;
        while end < values.len() && values[end] == values[start] {
            end += 1;
        }
        let t = (end - start) as f64;
        ties += t * (t - 1.0) * (2.0 * t + 5.0);
        start = end;
    }
    (n * (n - 1.0) * (2.0 * n + 5.0) - ties) / 18.0
}

/// Median of pairwise slopes over pairs with distinct times; `NaN` if none.
fn sens_slope(obs: &[(f64, f64)]) -> f64 {
    let mut slopes = Vec::with_capacity(obs.len() * obs.len().saturating_sub(1) / 2);
    for (i, &(ti, vi)) in obs.iter().enumerate() {
        for &(tj, vj) in &obs[i + 1..] {
            if tj != ti {
                slopes.push((vj - vi) / (tj - ti));
            }
        }
    }
    if slopes.is_empty() {
        return f64::NAN;
    }
    slopes.sort_by(total_cmp_asc);
    median(&slopes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(k, &v)| (1990.0 + k as f64, v))
            .collect()
    }

    fn mk() -> MannKendall {
        MannKendall::new(0.05).unwrap()
    }

    #[test]
    fn rejects_bad_alpha() {
        assert_eq!(
            MannKendall::new(0.0).unwrap_err(),
            TrendError::InvalidAlpha { alpha: 0.0 }
        );
        assert!(MannKendall::new(1.0).is_err());
        assert!(MannKendall::new(f64::NAN).is_err());
    }

    #[test]
    fn s_and_variance_without_ties() {
        let obs = series(&[1.0, 3.0, 2.0, 4.0]);
        // pairs: +,+,+,-,+,+ = 4
        assert_eq!(s_statistic(&obs), 4.0);
        // 4*3*13/18
        assert_relative_eq!(s_variance(&obs), 156.0 / 18.0, epsilon = 1e-12);
    }

    #[test]
    fn variance_tie_correction() {
        let obs = series(&[1.0, 1.0, 2.0, 2.0, 2.0]);
        // n term 5*4*15 = 300; ties 2*1*9 + 3*2*11 = 84
        assert_relative_eq!(s_variance(&obs), 216.0 / 18.0, epsilon = 1e-12);
    }

    #[test]
    fn strictly_increasing_ten_years() {
        let o = mk().test(&series(&[1.0, 2.0, 3.5, 4.0, 5.0, 6.2, 7.0, 8.0, 9.0, 11.0]));
        assert_eq!(o.class, TrendClass::Increasing);
        // S = 45, var = 125, z = 44 / sqrt(125)
        let z: f64 = 44.0 / 125.0_f64.sqrt();
        let expected = 2.0 * (1.0 - Normal::new(0.0, 1.0).unwrap().cdf(z));
        assert_relative_eq!(o.p_value, expected, epsilon = 1e-12);
        assert!(o.p_value < 0.001);
        assert!(o.slope > 0.0);
    }

    #[test]
    fn decreasing_series() {
        let o = mk().test(&series(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]));
        assert_eq!(o.class, TrendClass::Decreasing);
        assert_relative_eq!(o.slope, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_has_no_trend() {
        let o = mk().test(&series(&[4.0; 6]));
        assert_eq!(o.class, TrendClass::NoTrend);
        assert_relative_eq!(o.p_value, 1.0, epsilon = 1e-12);
        assert_eq!(o.slope, 0.0);
    }

    #[test]
    fn missing_years_are_skipped() {
        let mut s = series(&[1.0, f64::NAN, 3.0, 4.0, f64::NAN, 6.0, 7.0, 8.0, 9.0, 10.0]);
        s.reverse();
        let o = mk().test(&s);
        assert_eq!(o.class, TrendClass::Increasing);
        assert_relative_eq!(o.slope, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn all_missing_is_undefined() {
        let o = mk().test(&series(&[f64::NAN, f64::NAN]));
        assert_eq!(o.class, TrendClass::Undefined);
        assert!(o.p_value.is_nan());
    }

    #[test]
    fn single_observation_has_no_trend() {
        let o = mk().test(&[(2000.0, 5.0)]);
        assert_eq!(o.class, TrendClass::NoTrend);
        assert_relative_eq!(o.p_value, 1.0, epsilon = 1e-12);
        assert!(o.slope.is_nan());
    }
}
