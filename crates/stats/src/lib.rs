//! Statistical helper functions for the wd50 workspace.
//!
//! Missing values are represented as `NaN` throughout the workspace. The
//! `sorted_*` functions expect finite, ascending input; the `nan_*` functions
//! skip non-finite entries themselves and return `NaN` when nothing is left.

use std::cmp::Ordering;

/// Arithmetic mean of a slice. Returns `NaN` if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Linear-interpolation quantile (R type 7, NumPy's default `linear` method).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Collects the finite values of `data` and sorts them ascending.
pub fn finite_sorted(data: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = data.into_iter().filter(|v| v.is_finite()).collect();
    values.sort_by(total_cmp_asc);
    values
}

/// Median over the finite entries of `data`; `NaN` when there are none.
pub fn nan_median(data: impl IntoIterator<Item = f64>) -> f64 {
    let sorted = finite_sorted(data);
    if sorted.is_empty() {
        return f64::NAN;
    }
    median(&sorted)
}

/// Type-7 quantile over the finite entries of `data`; `NaN` when there are none.
pub fn nan_quantile(data: impl IntoIterator<Item = f64>, p: f64) -> f64 {
    let sorted = finite_sorted(data);
    if sorted.is_empty() {
        return f64::NAN;
    }
    quantile_type7(&sorted, p)
}

/// Ascending comparator for floats that never panics.
pub fn total_cmp_asc(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 2 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(x, y);
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

/// Root-mean-square difference over the pairs where both values are finite.
///
/// Returns `None` if there are no such pairs.
pub fn rmse(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(x, y);
    if pairs.is_empty() {
        return None;
    }
    let sq: f64 = pairs.iter().map(|(a, b)| (a - b) * (a - b)).sum();
    Some((sq / pairs.len() as f64).sqrt())
}

fn finite_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_quantile_type7() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_type7(&sorted, 0.25), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quantile_type7_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        // p=0.1 → h=0.4, lo=0, hi=1 → 1 + 0.4*(2-1) = 1.4
        assert_relative_eq!(quantile_type7(&sorted, 0.1), 1.4, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_type7_p95_matches_numpy() {
        // numpy.percentile([2, 5, 8, 20], 95) = 18.2
        let sorted = [2.0, 5.0, 8.0, 20.0];
        assert_relative_eq!(quantile_type7(&sorted, 0.95), 18.2, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_type7_single() {
        assert_relative_eq!(quantile_type7(&[7.0], 0.95), 7.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "quantile_type7: input must not be empty")]
    fn test_quantile_type7_empty_panics() {
        quantile_type7(&[], 0.5);
    }

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0]), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "median: input must not be empty")]
    fn test_median_empty_panics() {
        median(&[]);
    }

    #[test]
    fn test_finite_sorted_drops_nan_and_inf() {
        let v = finite_sorted([3.0, f64::NAN, 1.0, f64::INFINITY, 2.0]);
        assert_eq!(v, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nan_median_skips_missing() {
        assert_relative_eq!(
            nan_median([f64::NAN, 4.0, 1.0, f64::NAN, 10.0]),
            4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_nan_median_all_missing() {
        assert!(nan_median([f64::NAN, f64::NAN]).is_nan());
        assert!(nan_median(std::iter::empty()).is_nan());
    }

    #[test]
    fn test_nan_quantile() {
        let q = nan_quantile([5.0, f64::NAN, 1.0, 3.0, 2.0, 4.0], 0.05);
        // sorted [1..5], h = 0.2 → 1.2
        assert_relative_eq!(q, 1.2, epsilon = 1e-12);
        assert!(nan_quantile([f64::NAN], 0.5).is_nan());
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_correlation_insufficient() {
        assert!(pearson_correlation(&[1.0], &[3.0]).is_none());
    }

    #[test]
    fn test_pearson_correlation_constant() {
        assert!(pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_pearson_correlation_with_nan() {
        let x = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, f64::NAN, 8.0, 10.0];
        // Finite pairs: (1,2), (4,8), (5,10), perfect linear
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rmse() {
        // diffs: 1, -1, 2 → mean sq = 2
        let r = rmse(&[1.0, 2.0, 5.0, f64::NAN], &[0.0, 3.0, 3.0, 1.0]).unwrap();
        assert_relative_eq!(r, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert!(rmse(&[f64::NAN], &[1.0]).is_none());
    }
}
