//! Water-year stack assembly.

use std::time::Instant;

use chrono::NaiveDate;
use ndarray::{Array3, ArrayView1, s};
use tracing::{debug, info, info_span, warn};
use wd50_calendar::WaterYear;
use wd50_grid::{CoordinateAxes, DailyGrid};

use crate::config::StackConfig;
use crate::error::{SourceError, StackError};
use crate::source::DailyGridSource;
use crate::work_area::WorkArea;

/// One water year of daily grids, indexed `[day, lat, lon]`.
///
/// Only days that were actually retrieved are present; missing days are
/// absent rather than zero-filled, so `n_days()` may be smaller than the
/// calendar length of the year.
#[derive(Debug, Clone)]
pub struct WaterYearStack {
    water_year: i32,
    axes: CoordinateAxes,
    dates: Vec<NaiveDate>,
    values: Array3<f64>,
}

impl WaterYearStack {
    /// Assembles a stack from pre-built daily grids.
    ///
    /// Grids are sorted by date. Intended for callers that already hold
    /// decoded days; the normal path is [`build_water_year_stack`].
    ///
    /// # Errors
    ///
    /// Returns [`StackError::ShapeChanged`] if a grid's shape differs from
    /// the shape of `axes`.
    pub fn from_days(
        water_year: i32,
        axes: CoordinateAxes,
        mut days: Vec<DailyGrid>,
    ) -> Result<Self, StackError> {
        days.sort_by_key(DailyGrid::date);
        let expected = axes.shape();
        let mut dates = Vec::with_capacity(days.len());
        let mut flat = Vec::with_capacity(days.len() * axes.n_cells());
        for day in days {
            if day.shape() != expected {
                return Err(StackError::ShapeChanged {
                    date: day.date(),
                    expected,
                    got: day.shape(),
                });
            }
            dates.push(day.date());
            flat.extend(day.values().iter().copied());
        }
        let values = Array3::from_shape_vec((dates.len(), expected.0, expected.1), flat)?;
        Ok(Self {
            water_year,
            axes,
            dates,
            values,
        })
    }

    /// Water-year label.
    pub fn water_year(&self) -> i32 {
        self.water_year
    }

    /// Canonical axes fixed by the first retrieved day.
    pub fn axes(&self) -> &CoordinateAxes {
        &self.axes
    }

    /// Dates present in the stack, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of days present.
    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    /// All values, `[day, lat, lon]`.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Daily series of one cell across the days present.
    pub fn cell_series(&self, row: usize, col: usize) -> ArrayView1<'_, f64> {
        self.values.slice(s![.., row, col])
    }
}

/// Per-year acquisition counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackReport {
    /// Water-year label.
    pub water_year: i32,
    /// Calendar days in the water year.
    pub days_expected: usize,
    /// Days successfully retrieved and decoded.
    pub days_retrieved: usize,
    /// Days the source reported as unavailable.
    pub days_unavailable: usize,
    /// Days that existed but failed to decode.
    pub days_decode_failed: usize,
}

impl StackReport {
    /// Days skipped for any reason.
    pub fn days_skipped(&self) -> usize {
        self.days_unavailable + self.days_decode_failed
    }
}

/// Result of building one water year.
#[derive(Debug, Clone)]
pub enum StackOutcome {
    /// At least one day was retrieved.
    Built {
        /// The assembled stack.
        stack: WaterYearStack,
        /// Acquisition counts.
        report: StackReport,
    },
    /// No day of the year could be retrieved; the year is skipped.
    Empty {
        /// Acquisition counts.
        report: StackReport,
    },
}

impl StackOutcome {
    /// Acquisition counts, regardless of outcome.
    pub fn report(&self) -> &StackReport {
        match self {
            Self::Built { report, .. } | Self::Empty { report } => report,
        }
    }

    /// The stack, if one was built.
    pub fn into_stack(self) -> Option<WaterYearStack> {
        match self {
            Self::Built { stack, .. } => Some(stack),
            Self::Empty { .. } => None,
        }
    }
}

/// Builds the stack for `water_year` by requesting every calendar day from
/// `source`.
///
/// Unavailable and undecodable days are logged and skipped. The first
/// successfully retrieved day fixes the stack's axes; later days must have
/// the same shape.
///
/// # Errors
///
/// Returns [`StackError`] for an invalid configuration, a water year that
/// cannot be represented, or a day whose grid shape differs from the first
/// day's.
pub fn build_water_year_stack<S: DailyGridSource>(
    water_year: i32,
    source: &S,
    config: &StackConfig,
) -> Result<StackOutcome, StackError> {
    config.validate()?;
    let _span = info_span!("water_year", wy = water_year).entered();

    let dates = WaterYear::new(water_year, config.start_month())?.dates()?;
    let mut report = StackReport {
        water_year,
        days_expected: dates.len(),
        days_retrieved: 0,
        days_unavailable: 0,
        days_decode_failed: 0,
    };

    let mut axes: Option<CoordinateAxes> = None;
    let mut kept_dates = Vec::with_capacity(dates.len());
    let mut flat: Vec<f64> = Vec::new();
    let mut last_request: Option<Instant> = None;

    for date in dates {
        pace(&mut last_request, config);

        let work = WorkArea::new(config.work_root());
        let raw = match source.fetch(config.variable(), date, &work) {
            Ok(raw) => raw,
            Err(SourceError::Unavailable { reason, .. }) => {
                debug!(%date, %reason, "day unavailable, skipping");
                report.days_unavailable += 1;
                continue;
            }
            Err(SourceError::Decode { reason, .. }) => {
                warn!(%date, %reason, "day failed to decode, skipping");
                report.days_decode_failed += 1;
                continue;
            }
        };
        drop(work);

        let day_axes = axes.get_or_insert_with(|| {
            let established = raw.axes();
            debug!(%date, shape = ?established.shape(), "axes established");
            established
        });
        let day = DailyGrid::from_raw(date, raw);
        if day.shape() != day_axes.shape() {
            return Err(StackError::ShapeChanged {
                date,
                expected: day_axes.shape(),
                got: day.shape(),
            });
        }
        if flat.is_empty() {
            flat.reserve(report.days_expected * day_axes.n_cells());
        }
        flat.extend(day.values().iter().copied());
        kept_dates.push(date);
        report.days_retrieved += 1;
    }

    info!(
        days_expected = report.days_expected,
        days_retrieved = report.days_retrieved,
        days_unavailable = report.days_unavailable,
        days_decode_failed = report.days_decode_failed,
        "water year acquisition finished"
    );

    let Some(axes) = axes else {
        warn!("no days retrieved, skipping water year");
        return Ok(StackOutcome::Empty { report });
    };

    let (n_lat, n_lon) = axes.shape();
    let values = Array3::from_shape_vec((kept_dates.len(), n_lat, n_lon), flat)?;

    Ok(StackOutcome::Built {
        stack: WaterYearStack {
            water_year,
            axes,
            dates: kept_dates,
            values,
        },
        report,
    })
}

/// Sleeps so consecutive requests are at least `request_interval` apart.
fn pace(last_request: &mut Option<Instant>, config: &StackConfig) {
    let interval = config.request_interval();
    if interval.is_zero() {
        return;
    }
    if let Some(prev) = *last_request {
        let elapsed = prev.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
    *last_request = Some(Instant::now());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn day(y: i32, m: u32, d: u32, v: f64) -> DailyGrid {
        DailyGrid::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Array2::from_elem((2, 3), v),
        )
    }

    fn axes() -> CoordinateAxes {
        CoordinateAxes::new(vec![38.0, 37.0], vec![-121.0, -120.0, -119.0]).unwrap()
    }

    #[test]
    fn from_days_sorts_by_date() {
        let stack = WaterYearStack::from_days(
            2012,
            axes(),
            vec![day(2012, 1, 2, 2.0), day(2011, 10, 1, 1.0)],
        )
        .unwrap();
        assert_eq!(stack.n_days(), 2);
        assert_eq!(stack.dates()[0], NaiveDate::from_ymd_opt(2011, 10, 1).unwrap());
        assert_eq!(stack.cell_series(1, 2).to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn from_days_rejects_shape_change() {
        let bad = DailyGrid::new(
            NaiveDate::from_ymd_opt(2012, 1, 3).unwrap(),
            Array2::zeros((3, 3)),
        );
        let err = WaterYearStack::from_days(2012, axes(), vec![day(2012, 1, 2, 2.0), bad])
            .unwrap_err();
        assert!(matches!(err, StackError::ShapeChanged { .. }));
    }

    #[test]
    fn report_days_skipped() {
        let report = StackReport {
            water_year: 2012,
            days_expected: 366,
            days_retrieved: 360,
            days_unavailable: 4,
            days_decode_failed: 2,
        };
        assert_eq!(report.days_skipped(), 6);
    }
}
