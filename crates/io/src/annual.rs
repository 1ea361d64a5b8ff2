//! One NetCDF record per water year holding the five annual indices.

use std::path::Path;

use tracing::debug;
use wd50_metrics::{AnnualMetricsGrid, Metric, MetricsConfig};

use crate::error::IoError;
use crate::netcdf_read::{global_f64, open_file};
use crate::netcdf_write::{read_axes, read_layer, write_atomically, write_axes, write_layer};

/// File name of the record for `water_year`, e.g. `metrics_wy2012.nc`.
pub fn annual_file_name(water_year: i32) -> String {
    format!("metrics_wy{water_year}.nc")
}

/// Extracts the water year from the `wy<year>` part of a file name.
///
/// ```
/// assert_eq!(wd50_io::parse_water_year("metrics_wy2012.nc"), Some(2012));
/// assert_eq!(wd50_io::parse_water_year("metrics.nc"), None);
/// ```
pub fn parse_water_year(name: &str) -> Option<i32> {
    let start = name.find("wy")? + 2;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Writes `grid` to `path`, replacing any existing record.
///
/// # Errors
///
/// Returns [`IoError`] if the file cannot be created or written.
pub fn write_annual_metrics(
    path: &Path,
    grid: &AnnualMetricsGrid,
    config: &MetricsConfig,
) -> Result<(), IoError> {
    write_atomically(path, |file| {
        let title = format!(
            "Annual precipitation concentration indices, water year {}",
            grid.water_year()
        );
        file.add_attribute("title", title.as_str())?;
        file.add_attribute(
            "units",
            "wd50: days; prcptot: mm; r95p: days; r95ptot: mm; r95ptot_frac: 1",
        )?;
        file.add_attribute(
            "description",
            format!(
                "Wet days are days with precipitation >= {} mm; the percentile threshold is the {}th percentile of each cell's wet days in the water year",
                config.wet_day_threshold(),
                config.percentile()
            )
            .as_str(),
        )?;
        file.add_attribute("water_year", grid.water_year())?;
        file.add_attribute("wet_day_threshold", config.wet_day_threshold())?;
        file.add_attribute("percentile", config.percentile())?;
        file.add_attribute("Conventions", "CF-1.8")?;

        write_axes(file, grid.axes())?;
        for (metric, layer) in grid.layers() {
            write_layer(file, metric.name(), layer, metric.units(), metric.description())?;
        }
        Ok(())
    })?;
    debug!(path = %path.display(), wy = grid.water_year(), "annual record written");
    Ok(())
}

/// Reads an annual record written by [`write_annual_metrics`].
///
/// The water year comes from the `water_year` attribute, falling back to
/// the file name.
///
/// # Errors
///
/// Returns [`IoError`] if the file is missing, lacks a variable, or its
/// layers do not match its axes.
pub fn read_annual_metrics(path: &Path) -> Result<AnnualMetricsGrid, IoError> {
    let file = open_file(path)?;
    let axes = read_axes(&file, path)?;

    let water_year = global_f64(&file, "water_year")
        .map(|v| v as i32)
        .or_else(|| {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(parse_water_year)
        })
        .ok_or_else(|| IoError::InvalidRecord {
            path: path.to_path_buf(),
            reason: "no water_year attribute and no wy<year> in file name".to_string(),
        })?;

    let [wd50, prcptot, r95p, r95ptot, frac] =
        Metric::ALL.map(|metric| read_layer(&file, metric.name(), &axes, path));
    let layers = [wd50?, prcptot?, r95p?, r95ptot?, frac?];

    Ok(AnnualMetricsGrid::from_layers(water_year, axes, layers)?)
}
