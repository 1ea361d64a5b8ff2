//! Metrics command: daily stacks -> one annual record per water year.

use std::ops::RangeInclusive;

use anyhow::{Context, Result, bail};
use tracing::{error, info, info_span, warn};

use wd50_io::{MetricsArchive, NetcdfDailySource};
use wd50_metrics::{MetricsConfig, compute_annual_metrics};
use wd50_stack::{DailyGridSource, StackConfig, StackOutcome, build_water_year_stack};

use crate::cli::MetricsArgs;
use crate::config;
use crate::convert;

/// Run the annual metrics pipeline.
pub fn run(args: MetricsArgs) -> Result<()> {
    let _cmd = info_span!("metrics").entered();
    let mut config = config::load(&args.config)?;
    if let Some(dir) = args.output_dir {
        config.metrics.output_dir = dir;
    }
    let (start, end) = convert::year_range(
        args.start_year.or(config.metrics.start_year),
        args.end_year.or(config.metrics.end_year),
        "metrics",
    )?;

    if config.source.files.is_empty() {
        bail!("no daily input: set [source].files in config");
    }
    if let Some(ref dir) = config.source.work_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create work dir: {}", dir.display()))?;
    }
    let stack_cfg = convert::build_stack_config(&config.source)?;
    let metrics_cfg = convert::build_metrics_config(&config.metrics)?;

    let source = NetcdfDailySource::open(&config.source.files)
        .context("failed to index daily input files")?;
    let mut archive = MetricsArchive::create(&config.metrics.output_dir).with_context(|| {
        format!(
            "failed to open record directory: {}",
            config.metrics.output_dir.display()
        )
    })?;

    let counts = process_years(start..=end, &source, &mut archive, &stack_cfg, &metrics_cfg);
    info!(
        start,
        end,
        years_written = counts.years_written,
        years_empty = counts.years_empty,
        years_failed = counts.years_failed,
        days_retrieved = counts.days_retrieved,
        days_skipped = counts.days_skipped,
        "metrics run finished"
    );
    if counts.years_written == 0 {
        bail!("no water year in {start}..={end} produced a record");
    }
    Ok(())
}

/// Year and day counts of one metrics run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BatchCounts {
    years_written: usize,
    years_empty: usize,
    years_failed: usize,
    days_retrieved: usize,
    days_skipped: usize,
}

/// Builds, computes and stores each water year in `years`.
///
/// A year that fails at any step is logged and counted; the rest of the
/// range is still processed.
fn process_years<S: DailyGridSource>(
    years: RangeInclusive<i32>,
    source: &S,
    archive: &mut MetricsArchive,
    stack_cfg: &StackConfig,
    metrics_cfg: &MetricsConfig,
) -> BatchCounts {
    let mut counts = BatchCounts::default();
    for wy in years {
        let outcome = match build_water_year_stack(wy, source, stack_cfg) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(wy, error = %e, "water year failed, skipping");
                counts.years_failed += 1;
                continue;
            }
        };
        let report = *outcome.report();
        counts.days_retrieved += report.days_retrieved;
        counts.days_skipped += report.days_skipped();

        let stack = match outcome {
            StackOutcome::Built { stack, .. } => stack,
            StackOutcome::Empty { .. } => {
                warn!(wy, "no daily grids for water year, skipping");
                counts.years_empty += 1;
                continue;
            }
        };

        let grid = match compute_annual_metrics(&stack, metrics_cfg) {
            Ok(grid) => grid,
            Err(e) => {
                error!(wy, error = %e, "metric computation failed, skipping");
                counts.years_failed += 1;
                continue;
            }
        };
        let path = match archive.store(&grid, metrics_cfg) {
            Ok(path) => path,
            Err(e) => {
                error!(wy, error = %e, "failed to write record, skipping");
                counts.years_failed += 1;
                continue;
            }
        };
        info!(
            wy,
            days = report.days_retrieved,
            wet_cells = grid.wet_cell_count(),
            path = %path.display(),
            "water year written"
        );
        counts.years_written += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::Array2;
    use wd50_grid::{Bounds, RawRaster, Resolution};
    use wd50_stack::{SourceError, WorkArea};

    /// Serves the same wet 2x2 raster for every date.
    struct ConstantSource;

    impl DailyGridSource for ConstantSource {
        fn fetch(
            &self,
            _variable: &str,
            _date: NaiveDate,
            _work: &WorkArea,
        ) -> Result<RawRaster, SourceError> {
            let bounds = Bounds {
                top: 42.0,
                left: -125.0,
                right: -124.0,
                bottom: 41.0,
            };
            let res = Resolution::from_bounds(&bounds, 2, 2);
            Ok(RawRaster::new(Array2::from_elem((2, 2), 5.0), bounds, res, None).unwrap())
        }
    }

    #[test]
    fn failed_write_does_not_stop_later_years() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory where the 2013 record should go
        let blocked = dir.path().join("metrics_wy2013.nc");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), b"x").unwrap();

        let mut archive = MetricsArchive::create(dir.path()).unwrap();
        let counts = process_years(
            2012..=2014,
            &ConstantSource,
            &mut archive,
            &StackConfig::new("ppt"),
            &MetricsConfig::new(),
        );

        assert_eq!(counts.years_written, 2);
        assert_eq!(counts.years_failed, 1);
        assert_eq!(counts.years_empty, 0);
        assert_eq!(counts.days_retrieved, 366 + 365 + 365);
        assert!(dir.path().join("metrics_wy2012.nc").is_file());
        assert!(dir.path().join("metrics_wy2014.nc").is_file());
        assert!(blocked.is_dir());
        assert!(!dir.path().join("metrics_wy2013.nc.tmp").exists());
    }
}
