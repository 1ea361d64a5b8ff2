//! Integration tests for per-cell trend application.

use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array3;
use wd50_grid::CoordinateAxes;
use wd50_metrics::Metric;
use wd50_regrid::MultiYearGrid;
use wd50_trend::{MannKendall, TrendClass, TrendOutcome, TrendTest, apply_trend};

fn grid(values: Array3<f64>) -> MultiYearGrid {
    let (n_years, n_lat, n_lon) = values.dim();
    let axes = CoordinateAxes::new(
        (0..n_lat).map(|i| 35.0 + i as f64).collect(),
        (0..n_lon).map(|j| -121.0 + j as f64).collect(),
    )
    .unwrap();
    let years = (0..n_years as i32).map(|k| 1995 + k).collect();
    MultiYearGrid::new(Metric::Wd50, years, axes, values).unwrap()
}

#[test]
fn increasing_decade_is_significant() {
    let values = Array3::from_shape_fn((10, 1, 1), |(k, _, _)| 5.0 + 1.5 * k as f64);
    let trend = apply_trend(&grid(values), &MannKendall::new(0.05).unwrap());
    let o = trend.outcome(0, 0);
    assert_eq!(o.class, TrendClass::Increasing);
    assert!(o.slope > 0.0);
    assert!(o.p_value < 0.05);
}

#[test]
fn all_missing_cell_is_undefined() {
    let values = Array3::from_shape_fn((10, 1, 2), |(k, _, j)| {
        if j == 0 { f64::NAN } else { 20.0 - k as f64 }
    });
    let trend = apply_trend(&grid(values), &MannKendall::new(0.05).unwrap());
    let o = trend.outcome(0, 0);
    assert_eq!(o.class, TrendClass::Undefined);
    assert!(o.p_value.is_nan());
    assert!(o.slope.is_nan());
    assert_eq!(trend.class()[[0, 1]], TrendClass::Decreasing);
}

#[test]
fn summary_counts_significant_cells() {
    let values = Array3::from_shape_fn((12, 2, 2), |(k, i, j)| match (i, j) {
        (0, 0) => k as f64,
        (0, 1) => -(k as f64),
        (1, 0) => f64::NAN,
        _ => [3.0, 1.0, 2.0][k % 3],
    });
    let trend = apply_trend(&grid(values), &MannKendall::new(0.05).unwrap());
    let s = trend.summary(0.05);
    assert_eq!(s.cells, 4);
    assert_eq!(s.undefined, 1);
    assert_eq!(s.tested, 3);
    assert_eq!(s.significant, 2);
    assert_eq!(s.significant_increasing, 1);
    assert_eq!(s.significant_decreasing, 1);
}

/// Records how often it is called and what it receives.
struct CountingTest {
    calls: AtomicUsize,
}

impl TrendTest for CountingTest {
    fn test(&self, series: &[(f64, f64)]) -> TrendOutcome {
        self.calls.fetch_add(1, Ordering::Relaxed);
        assert!(series.iter().all(|(t, v)| t.is_finite() && v.is_finite()));
        TrendOutcome {
            class: TrendClass::NoTrend,
            p_value: 0.5,
            slope: series.len() as f64,
        }
    }
}

#[test]
fn test_sees_only_finite_pairs_and_skips_empty_cells() {
    let values = Array3::from_shape_fn((4, 2, 3), |(k, i, j)| {
        if i == 1 && j == 2 {
            f64::NAN
        } else if k == 1 {
            f64::NAN
        } else {
            1.0
        }
    });
    let counting = CountingTest {
        calls: AtomicUsize::new(0),
    };
    let trend = apply_trend(&grid(values), &counting);
    assert_eq!(counting.calls.load(Ordering::Relaxed), 5);
    assert_eq!(trend.slope()[[0, 0]], 3.0);
    assert_eq!(trend.class()[[1, 2]], TrendClass::Undefined);
    assert_eq!(trend.undefined_count(), 1);
    assert_eq!(trend.summary(0.05).undefined, 1);
    assert_eq!(trend.years(), &[1995, 1996, 1997, 1998]);
}
