//! Validity mask and cell-wise change between two aggregates.

use ndarray::{Array2, Zip};

/// Cells where both aggregates are finite and, with a floor, both strictly
/// above it. Swapping the arguments gives the same mask.
pub fn validity_mask(a: &Array2<f64>, b: &Array2<f64>, floor: Option<f64>) -> Array2<bool> {
    let ok = |v: f64| v.is_finite() && floor.is_none_or(|f| v > f);
    Zip::from(a).and(b).map_collect(|&x, &y| ok(x) && ok(y))
}

/// `later - earlier` on masked cells, `NaN` elsewhere.
pub fn difference(earlier: &Array2<f64>, later: &Array2<f64>, mask: &Array2<bool>) -> Array2<f64> {
    Zip::from(earlier)
        .and(later)
        .and(mask)
        .map_collect(|&e, &l, &m| if m { l - e } else { f64::NAN })
}

/// `(later - earlier) / earlier * 100` on masked cells with a strictly
/// positive earlier value, `NaN` elsewhere.
pub fn percent_change(
    earlier: &Array2<f64>,
    later: &Array2<f64>,
    mask: &Array2<bool>,
) -> Array2<f64> {
    Zip::from(earlier).and(later).and(mask).map_collect(|&e, &l, &m| {
        if m && e > 0.0 {
            (l - e) / e * 100.0
        } else {
            f64::NAN
        }
    })
}
