//! Gridded series at a site and agreement with station observations.

use serde::Serialize;
use wd50_regrid::MultiYearGrid;
use wd50_stats::{pearson_correlation, rmse};

use crate::aggregate::YearValue;

/// Metric series of the grid cell nearest to a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSeries {
    /// Requested site latitude.
    pub lat: f64,
    /// Requested site longitude.
    pub lon: f64,
    /// Centre latitude of the selected cell.
    pub cell_lat: f64,
    /// Centre longitude of the selected cell.
    pub cell_lon: f64,
    /// One entry per year of the grid.
    pub values: Vec<YearValue>,
}

/// Extracts the series of the cell whose centre is nearest to `(lat, lon)`.
pub fn point_series(grid: &MultiYearGrid, lat: f64, lon: f64) -> PointSeries {
    let (row, col) = grid.axes().nearest_index(lat, lon);
    let values = grid
        .years()
        .iter()
        .zip(grid.cell_series(row, col).iter())
        .map(|(&year, &value)| YearValue { year, value })
        .collect();
    PointSeries {
        lat,
        lon,
        cell_lat: grid.axes().lat()[row],
        cell_lon: grid.axes().lon()[col],
        values,
    }
}

/// Agreement between a station series and a gridded series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointAgreement {
    /// Years with a finite value on both sides.
    pub n: usize,
    /// Squared Pearson correlation; `None` with fewer than two pairs or a
    /// constant side.
    pub r_squared: Option<f64>,
    /// Root-mean-square difference.
    pub rmse: f64,
}

/// Compares `station` with `gridded` over the years both contain.
///
/// Returns `None` when no year has a finite value on both sides.
pub fn point_agreement(station: &[YearValue], gridded: &[YearValue]) -> Option<PointAgreement> {
    let (obs, sim): (Vec<f64>, Vec<f64>) = station
        .iter()
        .filter_map(|s| {
            gridded
                .iter()
                .find(|g| g.year == s.year)
                .map(|g| (s.value, g.value))
        })
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .unzip();
    let rmse = rmse(&obs, &sim)?;
    Some(PointAgreement {
        n: obs.len(),
        r_squared: pearson_correlation(&obs, &sim).map(|r| r * r),
        rmse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array3;
    use wd50_grid::CoordinateAxes;
    use wd50_metrics::Metric;

    fn yv(year: i32, value: f64) -> YearValue {
        YearValue { year, value }
    }

    #[test]
    fn nearest_cell_is_selected() {
        let axes = CoordinateAxes::new(vec![34.0, 35.0], vec![-120.0, -119.0, -118.0]).unwrap();
        let values = Array3::from_shape_fn((2, 2, 3), |(k, i, j)| (k * 100 + i * 10 + j) as f64);
        let grid = MultiYearGrid::new(Metric::Wd50, vec![2001, 2002], axes, values).unwrap();
        let p = point_series(&grid, 34.9, -118.2);
        assert_eq!((p.cell_lat, p.cell_lon), (35.0, -118.0));
        assert_eq!(p.values, vec![yv(2001, 12.0), yv(2002, 112.0)]);
    }

    #[test]
    fn agreement_over_shared_years() {
        let station = [yv(2000, 1.0), yv(2001, 2.0), yv(2002, 3.0), yv(2003, 9.0)];
        let gridded = [yv(2001, 4.0), yv(2002, 6.0), yv(2003, f64::NAN), yv(2000, 2.0)];
        let a = point_agreement(&station, &gridded).unwrap();
        assert_eq!(a.n, 3);
        assert_relative_eq!(a.r_squared.unwrap(), 1.0, epsilon = 1e-12);
        // diffs 1, 2, 3
        assert_relative_eq!(a.rmse, (14.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn agreement_without_overlap() {
        assert!(point_agreement(&[yv(1990, 1.0)], &[yv(2000, 1.0)]).is_none());
    }
}
