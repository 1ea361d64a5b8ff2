//! NetCDF record of a per-cell trend analysis.

use std::path::Path;

use tracing::info;
use wd50_trend::{TrendClass, TrendGrid};

use crate::error::IoError;
use crate::netcdf_write::{write_atomically, write_axes, write_code_layer, write_layer};

/// Writes `grid` to `path`, replacing any existing file.
///
/// The `trend` variable holds [`TrendClass::code`] values with
/// `flag_values`/`flag_meanings`; undefined cells carry the fill code.
///
/// # Errors
///
/// Returns [`IoError`] if the file cannot be created or written.
pub fn write_trend_record(path: &Path, grid: &TrendGrid, alpha: f64) -> Result<(), IoError> {
    let metric = grid.metric();
    let (first, last) = match (grid.years().first(), grid.years().last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => (0, 0),
    };
    let codes: Vec<i8> = grid.class().iter().map(|c| c.code()).collect();

    write_atomically(path, |file| {
        file.add_attribute(
            "title",
            format!("Mann-Kendall trend of {} over water years {first}-{last}", metric.name())
                .as_str(),
        )?;
        file.add_attribute(
            "description",
            format!(
                "Per-cell monotonic trend of annual {} ({}), {} water years, significance level {alpha}; slope is the Sen estimator in {} per year",
                metric.name(),
                metric.description(),
                grid.years().len(),
                metric.units()
            )
            .as_str(),
        )?;
        file.add_attribute("metric", metric.name())?;
        file.add_attribute("first_water_year", first)?;
        file.add_attribute("last_water_year", last)?;
        file.add_attribute("alpha", alpha)?;
        file.add_attribute("Conventions", "CF-1.8")?;

        write_axes(file, grid.axes())?;
        {
            let mut var =
                write_code_layer(file, "trend", &codes, TrendClass::UNDEFINED_CODE)?;
            var.put_attribute("long_name", "trend direction")?;
            var.put_attribute("flag_values", vec![-1i8, 0, 1])?;
            var.put_attribute("flag_meanings", "decreasing no_trend increasing")?;
        }
        write_layer(file, "p_value", grid.p_value(), "1", "two-sided p-value")?;
        let slope_units = format!("{} year-1", metric.units());
        write_layer(file, "slope", grid.slope(), &slope_units, "Sen slope")?;
        Ok(())
    })?;

    info!(path = %path.display(), metric = metric.name(), "trend record written");
    Ok(())
}
