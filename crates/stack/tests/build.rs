//! Integration tests for water-year stack building against in-memory sources.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndarray::Array2;
use wd50_grid::{Bounds, RawRaster, Resolution};
use wd50_stack::{
    DailyGridSource, SourceError, StackConfig, StackError, StackOutcome, WorkArea,
    build_water_year_stack,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raster(rows: usize, cols: usize, value: f64) -> RawRaster {
    let bounds = Bounds {
        top: 42.0,
        left: -125.0,
        right: -125.0 + cols as f64 * 0.5,
        bottom: 42.0 - rows as f64 * 0.5,
    };
    let res = Resolution::from_bounds(&bounds, rows, cols);
    RawRaster::new(Array2::from_elem((rows, cols), value), bounds, res, Some(-9999.0)).unwrap()
}

/// Serves a fixed set of dates; everything else is unavailable. Dates listed
/// in `corrupt` fail to decode.
#[derive(Default)]
struct MapSource {
    days: BTreeMap<NaiveDate, RawRaster>,
    corrupt: Vec<NaiveDate>,
    work_dirs: RefCell<Vec<PathBuf>>,
}

impl DailyGridSource for MapSource {
    fn fetch(
        &self,
        variable: &str,
        date: NaiveDate,
        work: &WorkArea,
    ) -> Result<RawRaster, SourceError> {
        assert_eq!(variable, "ppt");
        let dir = work.path().unwrap();
        assert!(dir.is_dir());
        std::fs::write(dir.join("download.zip"), b"zip").unwrap();
        self.work_dirs.borrow_mut().push(dir.to_path_buf());

        if self.corrupt.contains(&date) {
            return Err(SourceError::Decode {
                date,
                reason: "bad header".to_string(),
            });
        }
        self.days
            .get(&date)
            .cloned()
            .ok_or_else(|| SourceError::Unavailable {
                date,
                reason: "404".to_string(),
            })
    }
}

#[test]
fn partial_year_keeps_only_retrieved_days() {
    let mut source = MapSource::default();
    source.days.insert(ymd(2012, 3, 1), raster(2, 3, 4.0));
    source.days.insert(ymd(2011, 10, 1), raster(2, 3, 1.0));
    source.days.insert(ymd(2012, 9, 30), raster(2, 3, 9.0));
    source.corrupt.push(ymd(2012, 1, 1));

    let outcome = build_water_year_stack(2012, &source, &StackConfig::new("ppt")).unwrap();
    let report = *outcome.report();
    assert_eq!(report.days_expected, 366);
    assert_eq!(report.days_retrieved, 3);
    assert_eq!(report.days_decode_failed, 1);
    assert_eq!(report.days_unavailable, 362);
    assert_eq!(report.days_skipped(), 363);

    let stack = outcome.into_stack().expect("stack built");
    assert_eq!(stack.water_year(), 2012);
    assert_eq!(
        stack.dates(),
        &[ymd(2011, 10, 1), ymd(2012, 3, 1), ymd(2012, 9, 30)]
    );
    assert_eq!(stack.values().dim(), (3, 2, 3));
    assert_eq!(stack.cell_series(0, 0).to_vec(), vec![1.0, 4.0, 9.0]);
}

#[test]
fn axes_are_cell_centres_of_first_day() {
    let mut source = MapSource::default();
    source.days.insert(ymd(2011, 11, 5), raster(2, 3, 1.0));

    let stack = build_water_year_stack(2012, &source, &StackConfig::new("ppt"))
        .unwrap()
        .into_stack()
        .unwrap();
    let axes = stack.axes();
    assert_relative_eq!(axes.lat()[0], 41.75, epsilon = 1e-12);
    assert_relative_eq!(axes.lat()[1], 41.25, epsilon = 1e-12);
    assert_relative_eq!(axes.lon()[0], -124.75, epsilon = 1e-12);
    assert_relative_eq!(axes.lon()[2], -123.75, epsilon = 1e-12);
}

#[test]
fn sentinel_values_become_missing() {
    let mut source = MapSource::default();
    source.days.insert(ymd(2011, 10, 2), raster(1, 2, -9999.0));

    let stack = build_water_year_stack(2012, &source, &StackConfig::new("ppt"))
        .unwrap()
        .into_stack()
        .unwrap();
    assert!(stack.values().iter().all(|v| v.is_nan()));
}

#[test]
fn empty_year_is_not_an_error() {
    let source = MapSource::default();
    let outcome = build_water_year_stack(2013, &source, &StackConfig::new("ppt")).unwrap();
    assert!(matches!(outcome, StackOutcome::Empty { .. }));
    assert_eq!(outcome.report().days_retrieved, 0);
    assert_eq!(outcome.report().days_unavailable, 365);
    assert!(outcome.into_stack().is_none());
}

#[test]
fn work_areas_are_removed_after_every_day() {
    let root = tempfile::tempdir().unwrap();
    let mut source = MapSource::default();
    source.days.insert(ymd(2012, 5, 5), raster(1, 1, 3.0));
    source.corrupt.push(ymd(2012, 5, 6));

    let config = StackConfig::new("ppt").with_work_root(root.path());
    build_water_year_stack(2012, &source, &config).unwrap();

    let dirs = source.work_dirs.borrow();
    assert_eq!(dirs.len(), 366);
    assert!(dirs.iter().all(|d| d.starts_with(root.path())));
    assert!(dirs.iter().all(|d| !d.exists()));
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn shape_change_mid_year_is_rejected() {
    let mut source = MapSource::default();
    source.days.insert(ymd(2011, 10, 1), raster(2, 2, 1.0));
    source.days.insert(ymd(2011, 10, 2), raster(3, 2, 1.0));

    let err = build_water_year_stack(2012, &source, &StackConfig::new("ppt")).unwrap_err();
    match err {
        StackError::ShapeChanged {
            date,
            expected,
            got,
        } => {
            assert_eq!(date, ymd(2011, 10, 2));
            assert_eq!(expected, (2, 2));
            assert_eq!(got, (3, 2));
        }
        other => panic!("expected ShapeChanged, got {other:?}"),
    }
}

#[test]
fn invalid_config_is_rejected_before_fetching() {
    let source = MapSource::default();
    let err = build_water_year_stack(2012, &source, &StackConfig::new("")).unwrap_err();
    assert!(matches!(err, StackError::Validation { count: 1, .. }));
    assert!(source.work_dirs.borrow().is_empty());
}
