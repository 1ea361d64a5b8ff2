//! The external daily grid source boundary.

use chrono::NaiveDate;
use wd50_grid::RawRaster;

use crate::error::SourceError;
use crate::work_area::WorkArea;

/// Supplies one decoded raster per calendar date.
///
/// Implementations fetch and decode whatever backs them (a remote archive,
/// local files). Any scratch files belong in `work`, which is removed
/// after the call on every exit path. The directory only exists once
/// [`WorkArea::path`] is called; sources that need no scratch space leave
/// it alone.
pub trait DailyGridSource {
    /// Retrieves the raster of `variable` for `date`.
    ///
    /// # Errors
    ///
    /// [`SourceError::Unavailable`] when the date does not exist in the
    /// source, [`SourceError::Decode`] when it exists but cannot be parsed.
    fn fetch(&self, variable: &str, date: NaiveDate, work: &WorkArea)
    -> Result<RawRaster, SourceError>;
}

impl<S: DailyGridSource + ?Sized> DailyGridSource for &S {
    fn fetch(
        &self,
        variable: &str,
        date: NaiveDate,
        work: &WorkArea,
    ) -> Result<RawRaster, SourceError> {
        (**self).fetch(variable, date, work)
    }
}
