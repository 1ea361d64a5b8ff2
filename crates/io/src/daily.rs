//! Daily grids served from local CF NetCDF files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ndarray::{Array2, s};
use tracing::{debug, info, warn};
use wd50_grid::{Bounds, RawRaster, Resolution};
use wd50_stack::{DailyGridSource, SourceError, WorkArea};

use crate::error::IoError;
use crate::netcdf_read::{
    LAT_ALIASES, LON_ALIASES, fill_value, open_file, read_1d_f64, read_time_base,
    time_offsets_to_dates,
};

/// Sentinel assumed when a variable declares neither `_FillValue` nor
/// `missing_value`.
pub const DEFAULT_NODATA: f64 = -9999.0;

#[derive(Debug, Clone)]
struct DailyFile {
    path: PathBuf,
    lat: Vec<f64>,
    lon: Vec<f64>,
}

/// Serves one [`RawRaster`] per date from `(time, lat, lon)` NetCDF files.
///
/// Files are indexed once on [`open`](Self::open); every `fetch` reopens
/// the file holding the date and reads a single time slice. Rasters are
/// returned north-up with longitude ascending, bounds rebuilt from the
/// cell-centre axes.
#[derive(Debug, Clone)]
pub struct NetcdfDailySource {
    files: Vec<DailyFile>,
    index: BTreeMap<NaiveDate, (usize, usize)>,
}

impl NetcdfDailySource {
    /// Indexes the time axis of every file in `paths`.
    ///
    /// When two files cover the same date the later file wins.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if a file is missing or lacks a usable
    /// `time`, `lat` or `lon` variable.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self, IoError> {
        let mut files = Vec::with_capacity(paths.len());
        let mut index = BTreeMap::new();

        for path in paths {
            let path = path.as_ref();
            let file = open_file(path)?;
            let base = read_time_base(&file, "time", path)?;
            let offsets = read_1d_f64(&file, &["time"], path)?;
            let dates = time_offsets_to_dates(base, &offsets)?;
            let lat = read_1d_f64(&file, LAT_ALIASES, path)?;
            let lon = read_1d_f64(&file, LON_ALIASES, path)?;

            let file_idx = files.len();
            for (t, date) in dates.iter().enumerate() {
                if index.insert(*date, (file_idx, t)).is_some() {
                    warn!(
                        %date,
                        path = %path.display(),
                        "date present in several files, using the later one"
                    );
                }
            }
            debug!(
                path = %path.display(),
                days = dates.len(),
                n_lat = lat.len(),
                n_lon = lon.len(),
                "daily file indexed"
            );
            files.push(DailyFile {
                path: path.to_path_buf(),
                lat,
                lon,
            });
        }

        info!(files = files.len(), days = index.len(), "daily source opened");
        Ok(Self { files, index })
    }

    /// Number of distinct dates available.
    pub fn n_days(&self) -> usize {
        self.index.len()
    }

    /// First and last available dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.index.keys().next()?;
        let last = self.index.keys().next_back()?;
        Some((*first, *last))
    }

    fn read_slice(
        &self,
        variable: &str,
        date: NaiveDate,
        file_idx: usize,
        t: usize,
    ) -> Result<RawRaster, String> {
        let entry = &self.files[file_idx];
        let file = netcdf::open(&entry.path).map_err(|e| e.to_string())?;
        let var = file
            .variable(variable)
            .ok_or_else(|| format!("variable '{variable}' not in {}", entry.path.display()))?;
        let nodata = fill_value(&var).unwrap_or(DEFAULT_NODATA);

        let (n_lat, n_lon) = (entry.lat.len(), entry.lon.len());
        let flat = var
            .get_values::<f64, _>((t, .., ..))
            .map_err(|e| e.to_string())?;
        let values = Array2::from_shape_vec((n_lat, n_lon), flat).map_err(|e| e.to_string())?;

        let spacing = |axis: &[f64], name: &str| -> Result<f64, String> {
            match (axis.first(), axis.last()) {
                (Some(a), Some(b)) if axis.len() > 1 => {
                    Ok((b - a).abs() / (axis.len() - 1) as f64)
                }
                _ => Err(format!("{name} axis needs at least two points to infer cell size")),
            }
        };
        let resolution = Resolution {
            lat_res: spacing(&entry.lat, "lat")?,
            lon_res: spacing(&entry.lon, "lon")?,
        };

        let values = orient(values, &entry.lat, &entry.lon);
        let (lat_min, lat_max) = min_max(&entry.lat);
        let (lon_min, lon_max) = min_max(&entry.lon);
        let bounds = Bounds {
            top: lat_max + resolution.lat_res / 2.0,
            left: lon_min - resolution.lon_res / 2.0,
            right: lon_max + resolution.lon_res / 2.0,
            bottom: lat_min - resolution.lat_res / 2.0,
        };

        debug!(%date, file = %entry.path.display(), t, "daily slice read");
        RawRaster::new(values, bounds, resolution, Some(nodata)).map_err(|e| e.to_string())
    }
}

/// Flips rows so row 0 is the northernmost and columns so longitude ascends.
fn orient(values: Array2<f64>, lat: &[f64], lon: &[f64]) -> Array2<f64> {
    let lat_ascending = lat.len() > 1 && lat[0] < lat[lat.len() - 1];
    let lon_descending = lon.len() > 1 && lon[0] > lon[lon.len() - 1];
    match (lat_ascending, lon_descending) {
        (false, false) => values,
        (true, false) => values.slice(s![..;-1, ..]).as_standard_layout().into_owned(),
        (false, true) => values.slice(s![.., ..;-1]).as_standard_layout().into_owned(),
        (true, true) => values.slice(s![..;-1, ..;-1]).as_standard_layout().into_owned(),
    }
}

fn min_max(axis: &[f64]) -> (f64, f64) {
    axis.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Reads slices straight from the indexed files; the work area is never
/// created.
impl DailyGridSource for NetcdfDailySource {
    fn fetch(
        &self,
        variable: &str,
        date: NaiveDate,
        _work: &WorkArea,
    ) -> Result<RawRaster, SourceError> {
        let &(file_idx, t) = self.index.get(&date).ok_or_else(|| SourceError::Unavailable {
            date,
            reason: "date not covered by any input file".to_string(),
        })?;
        self.read_slice(variable, date, file_idx, t)
            .map_err(|reason| SourceError::Decode { date, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient_flips_south_up_rows() {
        let values = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let out = orient(values, &[30.0, 31.0], &[-120.0, -119.0]);
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn orient_flips_descending_lon() {
        let values = Array2::from_shape_vec((1, 3), vec![1.0, 2.0, 3.0]).unwrap();
        let out = orient(values, &[30.0], &[-118.0, -119.0, -120.0]);
        assert_eq!(out.row(0).to_vec(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn orient_keeps_north_up() {
        let values = Array2::from_shape_vec((2, 1), vec![1.0, 2.0]).unwrap();
        let out = orient(values.clone(), &[31.0, 30.0], &[-120.0]);
        assert_eq!(out, values);
    }

    #[test]
    fn min_max_of_axis() {
        assert_eq!(min_max(&[3.0, 1.0, 2.0]), (1.0, 3.0));
    }
}
