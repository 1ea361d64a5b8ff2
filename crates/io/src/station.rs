//! Daily station precipitation from CSV.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::IoError;

/// Reads a `date,value` CSV of daily precipitation (mm).
///
/// The first row is a header. Dates are `YYYY-MM-DD`. An empty value,
/// `NaN`, or a negative value is a missing day and becomes `NaN`. Rows are
/// returned in file order.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Csv`] for malformed CSV, or [`IoError::InvalidRecord`] for a
/// row with an unparsable date or value.
pub fn read_station_csv(path: &Path) -> Result<Vec<(NaiveDate, f64)>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut days = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let invalid = |reason: String| IoError::InvalidRecord {
            path: path.to_path_buf(),
            reason: format!("row {}: {reason}", line + 2),
        };

        let (Some(date_str), Some(value_str)) = (record.get(0), record.get(1)) else {
            return Err(invalid("expected two columns: date,value".to_string()));
        };
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| invalid(format!("bad date '{date_str}': {e}")))?;
        let value = parse_depth(value_str)
            .ok_or_else(|| invalid(format!("bad value '{value_str}'")))?;
        days.push((date, value));
    }

    debug!(path = %path.display(), days = days.len(), "station series read");
    Ok(days)
}

fn parse_depth(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(f64::NAN);
    }
    let v: f64 = s.parse().ok()?;
    if v.is_finite() && v >= 0.0 {
        Some(v)
    } else {
        Some(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_depth_cases() {
        assert_eq!(parse_depth("3.5"), Some(3.5));
        assert!(parse_depth("").unwrap().is_nan());
        assert!(parse_depth("NaN").unwrap().is_nan());
        assert!(parse_depth("-9999").unwrap().is_nan());
        assert_eq!(parse_depth("abc"), None);
    }
}
