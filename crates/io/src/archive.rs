//! Directory of annual records indexed by water year.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use wd50_metrics::{AnnualMetricsGrid, MetricsConfig};

use crate::annual::{annual_file_name, parse_water_year, read_annual_metrics, write_annual_metrics};
use crate::error::IoError;

/// Annual records loaded for a year range.
#[derive(Debug, Clone)]
pub struct LoadedRange {
    /// Grids found, ascending by water year.
    pub grids: Vec<AnnualMetricsGrid>,
    /// Years in the range without a record.
    pub missing: Vec<i32>,
}

/// A directory holding one `metrics_wy<year>.nc` record per water year.
///
/// Files whose names carry no `wy<year>` part are ignored.
#[derive(Debug, Clone)]
pub struct MetricsArchive {
    dir: PathBuf,
    index: BTreeMap<i32, PathBuf>,
}

impl MetricsArchive {
    /// Indexes an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if `dir` does not exist, or
    /// [`IoError::Fs`] if it cannot be listed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, IoError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(IoError::FileNotFound { path: dir });
        }

        let mut index = BTreeMap::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("nc") {
                continue;
            }
            let Some(year) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(parse_water_year)
            else {
                debug!(path = %path.display(), "no water year in file name, ignoring");
                continue;
            };
            if let Some(previous) = index.insert(year, path.clone()) {
                warn!(
                    wy = year,
                    kept = %path.display(),
                    ignored = %previous.display(),
                    "two records for one water year"
                );
            }
        }
        debug!(dir = %dir.display(), records = index.len(), "archive indexed");
        Ok(Self { dir, index })
    }

    /// Creates `dir` if needed and indexes it.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Fs`] if the directory cannot be created or listed.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, IoError> {
        std::fs::create_dir_all(dir.as_ref())?;
        Self::open(dir)
    }

    /// Archive directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Water years with a record, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.index.keys().copied()
    }

    /// Whether a record exists for `water_year`.
    pub fn contains(&self, water_year: i32) -> bool {
        self.index.contains_key(&water_year)
    }

    /// Path of the record for `water_year`, if any.
    pub fn path_of(&self, water_year: i32) -> Option<&Path> {
        self.index.get(&water_year).map(PathBuf::as_path)
    }

    /// Loads one year.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingYear`] if no record exists, or the read
    /// error of a malformed record.
    pub fn load(&self, water_year: i32) -> Result<AnnualMetricsGrid, IoError> {
        let path = self.path_of(water_year).ok_or_else(|| IoError::MissingYear {
            year: water_year,
            dir: self.dir.clone(),
        })?;
        read_annual_metrics(path)
    }

    /// Loads every year of `start..=end` that has a record.
    ///
    /// Years without a record are listed in [`LoadedRange::missing`] rather
    /// than failing the load.
    ///
    /// # Errors
    ///
    /// Returns the read error of the first malformed record.
    pub fn load_range(&self, start: i32, end: i32) -> Result<LoadedRange, IoError> {
        let mut grids = Vec::new();
        let mut missing = Vec::new();
        for year in start..=end {
            if self.contains(year) {
                grids.push(self.load(year)?);
            } else {
                missing.push(year);
            }
        }
        if !missing.is_empty() {
            warn!(start, end, missing = ?missing, "water years without a record");
        }
        info!(start, end, loaded = grids.len(), missing = missing.len(), "annual records loaded");
        Ok(LoadedRange { grids, missing })
    }

    /// Writes `grid` as the record of its water year, replacing any previous
    /// record for that year, and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if the record cannot be written.
    pub fn store(
        &mut self,
        grid: &AnnualMetricsGrid,
        config: &MetricsConfig,
    ) -> Result<PathBuf, IoError> {
        let year = grid.water_year();
        let path = self
            .index
            .get(&year)
            .cloned()
            .unwrap_or_else(|| self.dir.join(annual_file_name(year)));
        let replaced = self.contains(year);
        write_annual_metrics(&path, grid, config)?;
        info!(wy = year, path = %path.display(), replaced, "annual record stored");
        self.index.insert(year, path.clone());
        Ok(path)
    }
}
