//! Annual indices of a station's daily record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use wd50_calendar::water_year_of;
use wd50_metrics::{CellMetrics, Metric, MetricsConfig};

use crate::aggregate::YearValue;
use crate::error::CompareError;

/// Computes `metric` for every water year present in a daily station record.
///
/// Days are grouped by water year (starting in `start_month`) and each group
/// goes through the same wet-day filter and index definitions as a grid
/// cell, so station and grid values are directly comparable.
///
/// # Errors
///
/// Returns [`CompareError::Calendar`] if `start_month` is not 1..=12.
pub fn station_metric_series(
    days: &[(NaiveDate, f64)],
    metric: Metric,
    config: &MetricsConfig,
    start_month: u8,
) -> Result<Vec<YearValue>, CompareError> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for &(date, value) in days {
        by_year
            .entry(water_year_of(date, start_month)?)
            .or_default()
            .push(value);
    }
    Ok(by_year
        .into_iter()
        .map(|(year, values)| YearValue {
            year,
            value: CellMetrics::from_series(values, config).get(metric),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn groups_by_october_water_year() {
        let days = [
            (d(2011, 9, 30), 10.0),
            (d(2011, 10, 1), 5.0),
            (d(2012, 2, 1), 2.0),
            (d(2012, 9, 30), 0.5),
        ];
        let series = station_metric_series(&days, Metric::Prcptot, &MetricsConfig::new(), 10).unwrap();
        assert_eq!(
            series,
            vec![
                YearValue { year: 2011, value: 10.0 },
                YearValue { year: 2012, value: 7.0 },
            ]
        );
    }

    #[test]
    fn invalid_start_month() {
        let days = [(d(2015, 1, 1), 3.0)];
        assert!(matches!(
            station_metric_series(&days, Metric::Wd50, &MetricsConfig::new(), 13),
            Err(CompareError::Calendar(_))
        ));
    }

    #[test]
    fn dry_year_has_missing_wd50() {
        let days = [(d(2015, 1, 1), 0.0), (d(2015, 1, 2), 0.3)];
        let series = station_metric_series(&days, Metric::Wd50, &MetricsConfig::new(), 10).unwrap();
        assert_eq!(series.len(), 1);
        assert!(series[0].value.is_nan());
    }
}
