//! # wd50-calendar
//!
//! Water-year date arithmetic on the Gregorian calendar.
//!
//! A water year is labelled by the calendar year in which it *ends*: with
//! the standard October start, water year 2012 runs from 2011-10-01 through
//! 2012-09-30 and includes 2012-02-29.
//!
//! ## Quick Start
//!
//! ```
//! use wd50_calendar::{WaterYear, water_year_of};
//! use chrono::NaiveDate;
//!
//! let wy = WaterYear::october(2012);
//! let dates = wy.dates().unwrap();
//! assert_eq!(dates.len(), 366);
//!
//! let d = NaiveDate::from_ymd_opt(2011, 10, 1).unwrap();
//! assert_eq!(water_year_of(d, 10).unwrap(), 2012);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `water_year` | Water-year labelling and bounds |
//! | `sequence` | Inclusive daily date sequences |
//! | `error` | Error types |

mod error;
mod sequence;
mod water_year;

pub use error::CalendarError;
pub use sequence::date_sequence;
pub use water_year::{WaterYear, water_year, water_year_of};
