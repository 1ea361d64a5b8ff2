//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Latitude coordinate names tried in order.
pub(crate) const LAT_ALIASES: &[&str] = &["lat", "latitude", "y"];
/// Longitude coordinate names tried in order.
pub(crate) const LON_ALIASES: &[&str] = &["lon", "longitude", "x"];

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Look up a variable by name.
pub(crate) fn variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Numeric value of an attribute, whatever its stored integer or float type.
pub(crate) fn attribute_f64(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(*v),
        AttributeValue::Float(v) => Some(f64::from(*v)),
        AttributeValue::Int(v) => Some(f64::from(*v)),
        AttributeValue::Short(v) => Some(f64::from(*v)),
        AttributeValue::Schar(v) => Some(f64::from(*v)),
        AttributeValue::Longlong(v) => Some(*v as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|f| f64::from(*f)),
        _ => None,
    }
}

/// The variable's no-data sentinel from `_FillValue` or `missing_value`.
pub(crate) fn fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    ["_FillValue", "missing_value"].iter().find_map(|name| {
        var.attribute_value(name)
            .and_then(|res| res.ok())
            .and_then(|av| attribute_f64(&av))
    })
}

/// A numeric global attribute.
pub(crate) fn global_f64(file: &netcdf::File, name: &str) -> Option<f64> {
    file.attribute(name)
        .and_then(|attr| attr.value().ok())
        .and_then(|av| attribute_f64(&av))
}

/// Read the `units` attribute of a time variable and return its base date.
///
/// Parses CF-convention strings like `"days since YYYY-MM-DD"` or
/// `"days since YYYY-MM-DD HH:MM:SS"`. Only day units are accepted.
pub(crate) fn read_time_base(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<NaiveDate, IoError> {
    let var = variable(file, time_var, path)?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_days_since(&units_str)
}

/// Parse `"days since YYYY-MM-DD[ ...]"` into its base date.
pub(crate) fn parse_days_since(units: &str) -> Result<NaiveDate, IoError> {
    let parts: Vec<&str> = units.trim().splitn(3, ' ').collect();
    if parts.len() < 3 || parts[0] != "days" || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }

    // Take only the date portion (first 10 characters of parts[2]).
    let date_str = parts[2].get(..10).unwrap_or(parts[2]);

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date '{date_str}': {e}"),
    })
}

/// Convert floating-point day offsets from a base date into Gregorian dates.
///
/// Fractional offsets are truncated to whole days.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    offsets: &[f64],
) -> Result<Vec<NaiveDate>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            if !offset.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {offset}"),
                });
            }
            let days = offset as i64;
            base_date
                .checked_add_signed(TimeDelta::days(days))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {base_date}"),
                })
        })
        .collect()
}
