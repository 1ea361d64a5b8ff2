//! Putting two periods on identical axes.

use tracing::info;

use crate::error::RegridError;
use crate::multi_year::{AXES_TOL, MultiYearGrid};

/// Two periods of one metric on identical, ascending axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPeriods {
    reference: MultiYearGrid,
    other: MultiYearGrid,
    regridded: bool,
}

impl AlignedPeriods {
    /// The period whose axes were kept.
    pub fn reference(&self) -> &MultiYearGrid {
        &self.reference
    }

    /// The other period, on the reference axes.
    pub fn other(&self) -> &MultiYearGrid {
        &self.other
    }

    /// Whether the other period had to be interpolated.
    pub fn regridded(&self) -> bool {
        self.regridded
    }

    /// `(reference, other)`.
    pub fn into_parts(self) -> (MultiYearGrid, MultiYearGrid) {
        (self.reference, self.other)
    }
}

/// Expresses `other` on the axes of `reference`.
///
/// Both grids are oriented ascending first. If the axes then agree within
/// [`AXES_TOL`] the values of `other` are kept as they are and only its axes
/// are replaced by the reference's; otherwise every year of `other` is
/// bilinearly interpolated, leaving cells outside its domain missing.
///
/// # Errors
///
/// Returns [`RegridError::MetricMismatch`] if the periods hold different
/// metrics.
pub fn align_periods(
    reference: MultiYearGrid,
    other: MultiYearGrid,
) -> Result<AlignedPeriods, RegridError> {
    if reference.metric() != other.metric() {
        return Err(RegridError::MetricMismatch {
            left: reference.metric().name(),
            right: other.metric().name(),
        });
    }
    let reference = reference.into_ascending();
    let other = other.into_ascending();

    let regridded = !other.axes().approx_eq(reference.axes(), AXES_TOL);
    let other = if regridded {
        other.regrid(reference.axes())
    } else {
        MultiYearGrid::new(
            other.metric(),
            other.years().to_vec(),
            reference.axes().clone(),
            other.values().clone(),
        )?
    };
    info!(
        metric = %reference.metric(),
        reference_years = reference.n_years(),
        other_years = other.n_years(),
        shape = ?reference.axes().shape(),
        regridded,
        "periods aligned"
    );
    Ok(AlignedPeriods {
        reference,
        other,
        regridded,
    })
}
