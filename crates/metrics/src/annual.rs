//! Per-year grids of the five indices.

use ndarray::Array2;
use wd50_grid::CoordinateAxes;

use crate::error::MetricsError;
use crate::metric::Metric;
use crate::series::CellMetrics;

/// The five indices of one water year over a shared set of axes.
///
/// Produced once per year and never edited; reprocessing a year builds a
/// new value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualMetricsGrid {
    water_year: i32,
    axes: CoordinateAxes,
    layers: [Array2<f64>; 5],
}

impl AnnualMetricsGrid {
    /// Builds a grid from its layers, given in [`Metric::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::ShapeMismatch`] if a layer's shape differs
    /// from `axes`.
    pub fn from_layers(
        water_year: i32,
        axes: CoordinateAxes,
        layers: [Array2<f64>; 5],
    ) -> Result<Self, MetricsError> {
        let expected = axes.shape();
        for (metric, layer) in Metric::ALL.iter().zip(&layers) {
            if layer.dim() != expected {
                return Err(MetricsError::ShapeMismatch {
                    metric: metric.name(),
                    expected,
                    got: layer.dim(),
                });
            }
        }
        Ok(Self {
            water_year,
            axes,
            layers,
        })
    }

    /// Builds a grid from row-major per-cell results.
    pub(crate) fn from_cells(water_year: i32, axes: CoordinateAxes, cells: &[CellMetrics]) -> Self {
        let (n_lat, n_lon) = axes.shape();
        let layer = |f: fn(&CellMetrics) -> f64| {
            Array2::from_shape_fn((n_lat, n_lon), |(i, j)| f(&cells[i * n_lon + j]))
        };
        let layers = [
            layer(|c| c.wd50),
            layer(|c| c.prcptot),
            layer(|c| c.r95p),
            layer(|c| c.r95ptot),
            layer(|c| c.r95ptot_frac),
        ];
        Self {
            water_year,
            axes,
            layers,
        }
    }

    /// Water-year label.
    pub fn water_year(&self) -> i32 {
        self.water_year
    }

    /// Coordinate axes shared by all layers.
    pub fn axes(&self) -> &CoordinateAxes {
        &self.axes
    }

    /// `(n_lat, n_lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.axes.shape()
    }

    /// One layer.
    pub fn layer(&self, metric: Metric) -> &Array2<f64> {
        &self.layers[metric as usize]
    }

    /// All layers with their metric, in record order.
    pub fn layers(&self) -> impl Iterator<Item = (Metric, &Array2<f64>)> {
        Metric::ALL.into_iter().zip(self.layers.iter())
    }

    /// Consumes the grid, returning its axes and one layer.
    pub fn into_layer(self, metric: Metric) -> (CoordinateAxes, Array2<f64>) {
        let [a, b, c, d, e] = self.layers;
        let layer = match metric {
            Metric::Wd50 => a,
            Metric::Prcptot => b,
            Metric::R95p => c,
            Metric::R95ptot => d,
            Metric::R95ptotFrac => e,
        };
        (self.axes, layer)
    }

    /// All five indices at one cell.
    pub fn cell(&self, row: usize, col: usize) -> CellMetrics {
        CellMetrics {
            wd50: self.layers[0][[row, col]],
            prcptot: self.layers[1][[row, col]],
            r95p: self.layers[2][[row, col]],
            r95ptot: self.layers[3][[row, col]],
            r95ptot_frac: self.layers[4][[row, col]],
        }
    }

    /// Number of cells with at least one wet day.
    pub fn wet_cell_count(&self) -> usize {
        self.layer(Metric::Wd50).iter().filter(|v| !v.is_nan()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> CoordinateAxes {
        CoordinateAxes::new(vec![37.0, 38.0], vec![-121.0, -120.0, -119.0]).unwrap()
    }

    #[test]
    fn layer_order_matches_metric_order() {
        let layers = std::array::from_fn(|k| Array2::from_elem((2, 3), k as f64));
        let g = AnnualMetricsGrid::from_layers(2012, axes(), layers).unwrap();
        for (k, m) in Metric::ALL.into_iter().enumerate() {
            assert_eq!(g.layer(m)[[1, 2]], k as f64);
        }
        let c = g.cell(0, 0);
        assert_eq!(c.r95p, 2.0);
        assert_eq!(c.r95ptot_frac, 4.0);
        let (_, frac) = g.into_layer(Metric::R95ptotFrac);
        assert_eq!(frac[[0, 1]], 4.0);
    }

    #[test]
    fn from_layers_rejects_bad_shape() {
        let mut layers: [Array2<f64>; 5] = std::array::from_fn(|_| Array2::zeros((2, 3)));
        layers[3] = Array2::zeros((3, 2));
        let err = AnnualMetricsGrid::from_layers(2012, axes(), layers).unwrap_err();
        assert_eq!(
            err,
            MetricsError::ShapeMismatch {
                metric: "r95ptot",
                expected: (2, 3),
                got: (3, 2),
            }
        );
    }
}
