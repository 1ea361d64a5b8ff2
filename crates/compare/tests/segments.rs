//! Integration tests for two-period comparison.

use approx::assert_relative_eq;
use ndarray::Array3;
use wd50_compare::{
    CompareConfig, CompareError, ComparisonReport, compare_segments, spatial_median_series,
    to_json, validity_mask,
};
use wd50_grid::{CoordinateAxes, Region};
use wd50_metrics::Metric;
use wd50_regrid::MultiYearGrid;

fn axes() -> CoordinateAxes {
    CoordinateAxes::new(vec![33.0, 36.0, 39.0, 45.0], vec![-124.0, -118.0, -110.0]).unwrap()
}

fn period(first_year: i32, values: Array3<f64>) -> MultiYearGrid {
    let years = (0..values.dim().0 as i32).map(|k| first_year + k).collect();
    MultiYearGrid::new(Metric::Wd50, years, axes(), values).unwrap()
}

#[test]
fn percent_change_of_medians_is_fifty() {
    // earlier years 8, 10, 12 -> median 10; later 15, NaN, 14, 16 -> median 15
    let earlier = period(
        1981,
        Array3::from_shape_fn((3, 4, 3), |(k, _, _)| [8.0, 10.0, 12.0][k]),
    );
    let later = period(
        2011,
        Array3::from_shape_fn((4, 4, 3), |(k, _, _)| [15.0, f64::NAN, 14.0, 16.0][k]),
    );
    let c = compare_segments(&earlier, &later, &CompareConfig::new()).unwrap();
    assert_eq!(c.n_valid(), 12);
    assert_relative_eq!(c.percent_change[[2, 1]], 50.0, epsilon = 1e-12);
    assert_relative_eq!(c.difference[[0, 0]], 5.0, epsilon = 1e-12);
    let stats = c.percent_change_stats();
    assert_eq!(stats.count, 12);
    assert_relative_eq!(stats.median, 50.0, epsilon = 1e-12);
}

#[test]
fn mask_is_symmetric_for_swapped_periods() {
    let a = period(
        1981,
        Array3::from_shape_fn((2, 4, 3), |(k, i, j)| match (i + j) % 3 {
            0 => f64::NAN,
            1 => 0.3 + k as f64 * 0.1,
            _ => 5.0,
        }),
    );
    let b = period(
        2011,
        Array3::from_shape_fn((2, 4, 3), |(_, i, j)| if i == j { f64::NAN } else { 2.0 }),
    );
    for floor in [None, Some(0.5)] {
        let config = match floor {
            Some(f) => CompareConfig::new().with_floor(f),
            None => CompareConfig::new(),
        };
        let ab = compare_segments(&a, &b, &config).unwrap();
        let ba = compare_segments(&b, &a, &config).unwrap();
        assert_eq!(ab.mask, ba.mask);
        assert_eq!(
            validity_mask(&ab.earlier_median, &ab.later_median, floor),
            validity_mask(&ab.later_median, &ab.earlier_median, floor)
        );
    }
}

#[test]
fn floor_excludes_small_aggregates() {
    let earlier = period(1981, Array3::from_elem((1, 4, 3), 0.4));
    let later = period(2011, Array3::from_elem((1, 4, 3), 3.0));
    let c = compare_segments(&earlier, &later, &CompareConfig::new().with_floor(0.5)).unwrap();
    assert_eq!(c.n_valid(), 0);
    assert!(c.difference.iter().all(|v| v.is_nan()));
    assert_eq!(c.difference_stats().count, 0);
    // per-period summaries ignore the floor
    assert_eq!(c.earlier_stats().count, 12);
    assert_relative_eq!(c.earlier_stats().median, 0.4, epsilon = 1e-12);
}

#[test]
fn period_summaries_count_missing_cells() {
    // two cells have no finite year in the earlier period
    let earlier = period(
        1981,
        Array3::from_shape_fn((2, 4, 3), |(_, i, j)| {
            if i == 0 && j < 2 { f64::NAN } else { 4.0 }
        }),
    );
    let later = period(2011, Array3::from_elem((2, 4, 3), 6.0));
    let c = compare_segments(&earlier, &later, &CompareConfig::new()).unwrap();

    let e = c.earlier_stats();
    assert_eq!(e.count, 10);
    assert_eq!(e.missing, 2);
    let l = c.later_stats();
    assert_eq!(l.count, 12);
    assert_eq!(l.missing, 0);
    assert_eq!(c.n_valid(), 10);
    assert_eq!(c.difference_stats().count, 10);
    assert_relative_eq!(c.difference_stats().median, 2.0, epsilon = 1e-12);
}

#[test]
fn region_restricts_domain() {
    let earlier = period(1981, Array3::from_elem((1, 4, 3), 1.0));
    let later = period(2011, Array3::from_elem((1, 4, 3), 2.0));
    let ca = Region::new(32.54, 42.0, -125.0, -113.05).unwrap();
    let config = CompareConfig::new().with_region(ca);
    let c = compare_segments(&earlier, &later, &config).unwrap();
    assert_eq!(c.axes.lat(), &[33.0, 36.0, 39.0]);
    assert_eq!(c.axes.lon(), &[-124.0, -118.0]);
    assert_eq!(c.n_cells(), 6);

    let report = ComparisonReport::new(&c, &config)
        .with_spatial_medians(spatial_median_series(&earlier), spatial_median_series(&later));
    let json = to_json(&report).unwrap();
    assert!(json.contains("\"metric\": \"wd50\""));
    assert!(json.contains("\"n_valid\": 6"));
    assert!(json.contains("\"spatial_medians\""));
    assert!(!json.contains("\"sites\""));
}

#[test]
fn unaligned_periods_are_rejected() {
    let earlier = period(1981, Array3::zeros((1, 4, 3)));
    let other_axes = CoordinateAxes::new(vec![33.0, 36.0], vec![-124.0, -118.0, -110.0]).unwrap();
    let later = MultiYearGrid::new(Metric::Wd50, vec![2011], other_axes, Array3::zeros((1, 2, 3)))
        .unwrap();
    let err = compare_segments(&earlier, &later, &CompareConfig::new()).unwrap_err();
    assert!(matches!(
        err,
        CompareError::AxesMismatch {
            earlier: (4, 3),
            later: (2, 3)
        }
    ));
}

#[test]
fn different_metrics_are_rejected() {
    let earlier = period(1981, Array3::zeros((1, 4, 3)));
    let later = MultiYearGrid::new(Metric::R95p, vec![2011], axes(), Array3::zeros((1, 4, 3)))
        .unwrap();
    assert!(matches!(
        compare_segments(&earlier, &later, &CompareConfig::new()),
        Err(CompareError::MetricMismatch { .. })
    ));
}
