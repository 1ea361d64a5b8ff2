use chrono::NaiveDate;
use wd50_calendar::{WaterYear, water_year_of};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn leap_water_year_has_366_days() {
    // WY 2012 spans Feb 29 2012.
    let dates = WaterYear::october(2012).dates().unwrap();
    assert_eq!(dates.len(), 366);
    assert!(dates.contains(&ymd(2012, 2, 29)));
}

#[test]
fn common_water_year_has_365_days() {
    let dates = WaterYear::october(2013).dates().unwrap();
    assert_eq!(dates.len(), 365);
    assert_eq!(dates[0], ymd(2012, 10, 1));
    assert_eq!(*dates.last().unwrap(), ymd(2013, 9, 30));
}

#[test]
fn every_date_maps_back_to_its_water_year() {
    for wy in [1990, 2000, 2012, 2025] {
        for d in WaterYear::october(wy).dates().unwrap() {
            assert_eq!(water_year_of(d, 10).unwrap(), wy);
        }
    }
}

#[test]
fn consecutive_water_years_are_contiguous() {
    let a = WaterYear::october(2005).last_day().unwrap();
    let b = WaterYear::october(2006).first_day().unwrap();
    assert_eq!(b.signed_duration_since(a).num_days(), 1);
}
