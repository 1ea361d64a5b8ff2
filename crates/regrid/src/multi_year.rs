//! Year-stacked grids of one metric.

use ndarray::{Array2, Array3, ArrayView1, ArrayView2, Axis, s};
use rayon::prelude::*;
use tracing::debug;
use wd50_grid::{CoordinateAxes, Region};
use wd50_metrics::{AnnualMetricsGrid, Metric};

use crate::bilinear::BilinearWeights;
use crate::error::RegridError;

/// Tolerance in degrees under which two axes are treated as identical.
pub const AXES_TOL: f64 = 1e-6;

/// One metric over a range of water years, indexed `[year, lat, lon]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiYearGrid {
    metric: Metric,
    years: Vec<i32>,
    axes: CoordinateAxes,
    values: Array3<f64>,
}

impl MultiYearGrid {
    /// Creates a grid from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::ShapeMismatch`] if `values` is not
    /// `(years.len(), n_lat, n_lon)`, or [`RegridError::DuplicateYear`] if a
    /// year repeats.
    pub fn new(
        metric: Metric,
        years: Vec<i32>,
        axes: CoordinateAxes,
        values: Array3<f64>,
    ) -> Result<Self, RegridError> {
        let (n_lat, n_lon) = axes.shape();
        let expected = (years.len(), n_lat, n_lon);
        if values.dim() != expected {
            return Err(RegridError::ShapeMismatch {
                expected,
                got: values.dim(),
            });
        }
        check_unique(&years)?;
        Ok(Self {
            metric,
            years,
            axes,
            values,
        })
    }

    /// Metric held by every layer.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Water years, one per layer.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Number of years.
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    /// Shared coordinate axes.
    pub fn axes(&self) -> &CoordinateAxes {
        &self.axes
    }

    /// All values, `[year, lat, lon]`.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Layer of the `k`-th year.
    pub fn layer(&self, k: usize) -> ArrayView2<'_, f64> {
        self.values.index_axis(Axis(0), k)
    }

    /// Per-year series of one cell.
    pub fn cell_series(&self, row: usize, col: usize) -> ArrayView1<'_, f64> {
        self.values.slice(s![.., row, col])
    }

    /// Position of `year` in [`years`](Self::years).
    pub fn year_index(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|&y| y == year)
    }

    /// Returns the grid with both axes ascending, flipping values to match.
    pub fn into_ascending(self) -> Self {
        let Self {
            metric,
            years,
            mut axes,
            mut values,
        } = self;
        if !axes.lat_ascending() {
            axes = axes.reversed_lat();
            values = values.slice(s![.., ..;-1, ..]).to_owned();
        }
        if !axes.lon_ascending() {
            axes = axes.reversed_lon();
            values = values.slice(s![.., .., ..;-1]).to_owned();
        }
        Self {
            metric,
            years,
            axes,
            values,
        }
    }

    /// Resamples every year onto `target` by bilinear interpolation.
    ///
    /// Target cells outside this grid's domain are `NaN`.
    pub fn regrid(&self, target: &CoordinateAxes) -> Self {
        let ascending = self.clone().into_ascending();
        let weights = BilinearWeights::new(&ascending.axes, target);
        let views: Vec<ArrayView2<'_, f64>> = ascending.values.outer_iter().collect();
        let layers: Vec<Array2<f64>> = views
            .into_par_iter()
            .map(|layer| weights.apply(layer))
            .collect();
        Self {
            metric: self.metric,
            years: self.years.clone(),
            axes: target.clone(),
            values: stack_layers(target, &layers),
        }
    }

    /// Restricts the grid to the cells inside `region` (inclusive bounds).
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::EmptyRegion`] if no row or no column falls
    /// inside the box.
    pub fn subset(&self, region: &Region) -> Result<Self, RegridError> {
        let rows = region.lat_indices(&self.axes);
        let cols = region.lon_indices(&self.axes);
        if rows.is_empty() || cols.is_empty() {
            return Err(RegridError::EmptyRegion {
                n_lat: rows.len(),
                n_lon: cols.len(),
            });
        }
        let lat = rows.iter().map(|&i| self.axes.lat()[i]).collect();
        let lon = cols.iter().map(|&j| self.axes.lon()[j]).collect();
        let values = self
            .values
            .select(Axis(1), &rows)
            .select(Axis(2), &cols);
        Ok(Self {
            metric: self.metric,
            years: self.years.clone(),
            axes: CoordinateAxes::new(lat, lon)?,
            values,
        })
    }
}

/// Concatenates one metric of several annual grids along a year dimension.
///
/// Grids are ordered by water year and every grid is oriented ascending.
/// The earliest year's axes become the grid's axes; a later year whose axes
/// differ (a different processing run) is regridded onto them.
///
/// # Errors
///
/// Returns [`RegridError::Empty`] for no input and
/// [`RegridError::DuplicateYear`] if a year repeats.
pub fn assemble(
    metric: Metric,
    grids: impl IntoIterator<Item = AnnualMetricsGrid>,
) -> Result<MultiYearGrid, RegridError> {
    let mut grids: Vec<AnnualMetricsGrid> = grids.into_iter().collect();
    if grids.is_empty() {
        return Err(RegridError::Empty);
    }
    grids.sort_by_key(AnnualMetricsGrid::water_year);
    let years: Vec<i32> = grids.iter().map(AnnualMetricsGrid::water_year).collect();
    check_unique(&years)?;

    let mut reference: Option<CoordinateAxes> = None;
    let mut layers = Vec::with_capacity(grids.len());
    for grid in grids {
        let wy = grid.water_year();
        let (axes, layer) = grid.into_layer(metric);
        let single = MultiYearGrid {
            metric,
            years: vec![wy],
            axes,
            values: layer.insert_axis(Axis(0)),
        }
        .into_ascending();

        let reference = reference.get_or_insert_with(|| single.axes.clone());
        let single = if single.axes.approx_eq(reference, AXES_TOL) {
            single
        } else {
            debug!(
                wy,
                from = ?single.axes.shape(),
                to = ?reference.shape(),
                "regridding year onto period axes"
            );
            single.regrid(reference)
        };
        layers.push(single.values.index_axis_move(Axis(0), 0));
    }

    let axes = reference.ok_or(RegridError::Empty)?;
    let values = stack_layers(&axes, &layers);
    Ok(MultiYearGrid {
        metric,
        years,
        axes,
        values,
    })
}

fn stack_layers(axes: &CoordinateAxes, layers: &[Array2<f64>]) -> Array3<f64> {
    let (n_lat, n_lon) = axes.shape();
    Array3::from_shape_fn((layers.len(), n_lat, n_lon), |(k, i, j)| layers[k][[i, j]])
}

fn check_unique(years: &[i32]) -> Result<(), RegridError> {
    let mut sorted = years.to_vec();
    sorted.sort_unstable();
    match sorted.windows(2).find(|w| w[0] == w[1]) {
        Some(w) => Err(RegridError::DuplicateYear { year: w[0] }),
        None => Ok(()),
    }
}
