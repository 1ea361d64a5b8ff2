//! Bilinear interpolation between rectilinear lat/lon grids.

use ndarray::{Array2, ArrayView2};
use wd50_grid::CoordinateAxes;

/// Target coordinates this close outside the source domain snap to its edge.
const EDGE_TOL: f64 = 1e-9;

/// Neighbouring source indices and the fractional position between them.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket {
    lo: usize,
    hi: usize,
    frac: f64,
}

/// Locates `x` on an ascending `axis`; `None` outside the axis range.
fn bracket(axis: &[f64], x: f64) -> Option<Bracket> {
    let n = axis.len();
    let first = axis[0];
    let last = axis[n - 1];
    if !x.is_finite() || x < first - EDGE_TOL || x > last + EDGE_TOL {
        return None;
    }
    if x <= first {
        return Some(Bracket { lo: 0, hi: 0, frac: 0.0 });
    }
    if x >= last {
        return Some(Bracket {
            lo: n - 1,
            hi: n - 1,
            frac: 0.0,
        });
    }
    // first < x < last, so 1 <= p <= n - 1
    let p = axis.partition_point(|&a| a <= x);
    let (lo, hi) = (p - 1, p);
    let frac = (x - axis[lo]) / (axis[hi] - axis[lo]);
    Some(Bracket { lo, hi, frac })
}

/// Precomputed interpolation weights from one set of axes onto another.
///
/// The source axes must be ascending; the target axes may run either way
/// and the output follows their order.
#[derive(Debug, Clone)]
pub struct BilinearWeights {
    lat: Vec<Option<Bracket>>,
    lon: Vec<Option<Bracket>>,
    src_shape: (usize, usize),
}

impl BilinearWeights {
    /// Computes weights for every target coordinate.
    pub fn new(source: &CoordinateAxes, target: &CoordinateAxes) -> Self {
        debug_assert!(source.lat_ascending() && source.lon_ascending());
        Self {
            lat: target.lat().iter().map(|&y| bracket(source.lat(), y)).collect(),
            lon: target.lon().iter().map(|&x| bracket(source.lon(), x)).collect(),
            src_shape: source.shape(),
        }
    }

    /// Shape of the interpolated output.
    pub fn target_shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Interpolates one source layer onto the target axes.
    ///
    /// Target points outside the source domain are `NaN`. A `NaN` at any
    /// corner with a non-zero weight makes the result `NaN`; corners with
    /// zero weight are ignored, so a target point that coincides with a
    /// source node takes that node's value exactly.
    ///
    /// # Panics
    ///
    /// Panics if `source` does not have the shape of the source axes.
    pub fn apply(&self, source: ArrayView2<'_, f64>) -> Array2<f64> {
        assert_eq!(source.dim(), self.src_shape, "source layer shape");
        Array2::from_shape_fn(self.target_shape(), |(i, j)| {
            match (self.lat[i], self.lon[j]) {
                (Some(y), Some(x)) => interpolate(&source, y, x),
                _ => f64::NAN,
            }
        })
    }
}

fn interpolate(source: &ArrayView2<'_, f64>, y: Bracket, x: Bracket) -> f64 {
    let corners = [
        (y.lo, x.lo, (1.0 - y.frac) * (1.0 - x.frac)),
        (y.lo, x.hi, (1.0 - y.frac) * x.frac),
        (y.hi, x.lo, y.frac * (1.0 - x.frac)),
        (y.hi, x.hi, y.frac * x.frac),
    ];
    let mut acc = 0.0;
    for (r, c, w) in corners {
        if w == 0.0 {
            continue;
        }
        let v = source[[r, c]];
        if v.is_nan() {
            return f64::NAN;
        }
        acc += w * v;
    }
    acc
}
