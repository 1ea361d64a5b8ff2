//! Low-level NetCDF writing helpers shared by the record writers.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use wd50_grid::CoordinateAxes;

use crate::error::IoError;

/// Deflate level applied to every data variable.
const DEFLATE_LEVEL: i32 = 4;

/// Builds a NetCDF file beside `path` and renames it into place.
///
/// The file is only visible under its final name once `build` has
/// succeeded and the handle is closed, so an existing record is replaced
/// wholesale or not at all.
pub(crate) fn write_atomically<F>(path: &Path, build: F) -> Result<(), IoError>
where
    F: FnOnce(&mut netcdf::FileMut) -> Result<(), IoError>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = temporary_sibling(path);

    let result = netcdf::create(&tmp)
        .map_err(IoError::from)
        .and_then(|mut file| build(&mut file));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Adds `lat` and `lon` dimensions with CF coordinate variables.
pub(crate) fn write_axes(file: &mut netcdf::FileMut, axes: &CoordinateAxes) -> Result<(), IoError> {
    file.add_dimension("lat", axes.n_lat())?;
    file.add_dimension("lon", axes.n_lon())?;

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_attribute("standard_name", "latitude")?;
        var.put_values(axes.lat(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_attribute("standard_name", "longitude")?;
        var.put_values(axes.lon(), ..)?;
    }
    Ok(())
}

/// Adds a compressed `f64` variable over `(lat, lon)`. Missing cells stay `NaN`.
pub(crate) fn write_layer(
    file: &mut netcdf::FileMut,
    name: &str,
    values: &Array2<f64>,
    units: &str,
    long_name: &str,
) -> Result<(), IoError> {
    let flat: Vec<f64> = values.iter().copied().collect();
    let mut var = file.add_variable::<f64>(name, &["lat", "lon"])?;
    var.set_compression(DEFLATE_LEVEL, true)?;
    var.put_attribute("_FillValue", f64::NAN)?;
    var.put_attribute("units", units)?;
    var.put_attribute("long_name", long_name)?;
    var.put_values(&flat, ..)?;
    Ok(())
}

/// Adds a compressed `i8` code variable over `(lat, lon)`.
pub(crate) fn write_code_layer(
    file: &mut netcdf::FileMut,
    name: &str,
    codes: &[i8],
    fill: i8,
) -> Result<netcdf::VariableMut<'_>, IoError> {
    let mut var = file.add_variable::<i8>(name, &["lat", "lon"])?;
    var.set_compression(DEFLATE_LEVEL, true)?;
    var.put_attribute("_FillValue", fill)?;
    var.put_values(codes, ..)?;
    Ok(var)
}

/// Reads a 2-D `f64` variable shaped like `axes`, mapping its fill value to `NaN`.
pub(crate) fn read_layer(
    file: &netcdf::File,
    name: &str,
    axes: &CoordinateAxes,
    path: &Path,
) -> Result<Array2<f64>, IoError> {
    let var = crate::netcdf_read::variable(file, name, path)?;
    let fill = crate::netcdf_read::fill_value(&var);
    let mut flat = var.get_values::<f64, _>(..)?;
    if flat.len() != axes.n_cells() {
        return Err(IoError::DimensionMismatch {
            name: name.to_string(),
            expected: axes.n_cells(),
            got: flat.len(),
        });
    }
    if let Some(fill) = fill.filter(|f| f.is_finite()) {
        for v in flat.iter_mut().filter(|v| **v == fill) {
            *v = f64::NAN;
        }
    }
    Array2::from_shape_vec(axes.shape(), flat).map_err(|e| IoError::InvalidRecord {
        path: path.to_path_buf(),
        reason: format!("variable '{name}': {e}"),
    })
}

/// Reads the `lat`/`lon` coordinate variables of a record.
pub(crate) fn read_axes(file: &netcdf::File, path: &Path) -> Result<CoordinateAxes, IoError> {
    let lat = crate::netcdf_read::read_1d_f64(file, crate::netcdf_read::LAT_ALIASES, path)?;
    let lon = crate::netcdf_read::read_1d_f64(file, crate::netcdf_read::LON_ALIASES, path)?;
    Ok(CoordinateAxes::new(lat, lon)?)
}
