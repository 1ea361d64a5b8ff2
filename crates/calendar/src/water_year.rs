//! Water year computation.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::sequence::date_sequence;

/// Computes the water year for a given calendar year and month.
///
/// A water year is defined by its `start_month`. All months from `start_month`
/// onward belong to the *next* calendar year's water year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `start_month` is
/// outside 1..=12.
///
/// # Examples
///
/// ```
/// use wd50_calendar::water_year;
///
/// // October-start water year (standard US hydrological convention):
/// assert_eq!(water_year(2000, 10, 10).unwrap(), 2001); // Oct 2000 -> WY 2001
/// assert_eq!(water_year(2001, 9, 10).unwrap(), 2001);  // Sep 2001 -> WY 2001
///
/// // Calendar year (start_month = 1):
/// assert_eq!(water_year(2000, 6, 1).unwrap(), 2000);
/// ```
pub fn water_year(year: i32, month: u8, start_month: u8) -> Result<i32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    if !(1..=12).contains(&start_month) {
        return Err(CalendarError::InvalidMonth { month: start_month });
    }
    if start_month == 1 {
        return Ok(year);
    }
    if month >= start_month {
        Ok(year + 1)
    } else {
        Ok(year)
    }
}

/// Water year containing `date`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `start_month` is outside 1..=12.
pub fn water_year_of(date: NaiveDate, start_month: u8) -> Result<i32, CalendarError> {
    // chrono months are always 1..=12
    water_year(date.year(), date.month() as u8, start_month)
}

/// One labelled water year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaterYear {
    year: i32,
    start_month: u8,
}

impl WaterYear {
    /// Creates a water year with an arbitrary start month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `start_month` is outside 1..=12.
    pub fn new(year: i32, start_month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&start_month) {
            return Err(CalendarError::InvalidMonth { month: start_month });
        }
        Ok(Self { year, start_month })
    }

    /// The standard October–September water year.
    pub fn october(year: i32) -> Self {
        Self {
            year,
            start_month: 10,
        }
    }

    /// Returns the water-year label.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the first month of the water year.
    pub fn start_month(self) -> u8 {
        self.start_month
    }

    /// First calendar day of the water year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if chrono cannot represent it.
    pub fn first_day(self) -> Result<NaiveDate, CalendarError> {
        let start_year = if self.start_month == 1 {
            self.year
        } else {
            self.year - 1
        };
        NaiveDate::from_ymd_opt(start_year, u32::from(self.start_month), 1)
            .ok_or(CalendarError::YearOutOfRange { year: self.year })
    }

    /// Last calendar day of the water year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if chrono cannot represent it.
    pub fn last_day(self) -> Result<NaiveDate, CalendarError> {
        let next = Self {
            year: self.year + 1,
            start_month: self.start_month,
        };
        next.first_day()?
            .pred_opt()
            .ok_or(CalendarError::YearOutOfRange { year: self.year })
    }

    /// Every calendar day of the water year, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if chrono cannot represent
    /// the bounds.
    pub fn dates(self) -> Result<Vec<NaiveDate>, CalendarError> {
        Ok(date_sequence(self.first_day()?, self.last_day()?))
    }

    /// Returns `true` if `date` falls inside this water year.
    pub fn contains(self, date: NaiveDate) -> bool {
        water_year_of(date, self.start_month) == Ok(self.year)
    }
}
