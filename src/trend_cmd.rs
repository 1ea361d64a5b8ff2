//! Trend command: per-cell Mann-Kendall test over a range of water years.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use wd50_io::{MetricsArchive, write_trend_record};
use wd50_regrid::assemble;
use wd50_trend::apply_trend;

use crate::cli::TrendArgs;
use crate::config;
use crate::convert;

/// Run the trend analysis.
pub fn run(args: TrendArgs) -> Result<()> {
    let _cmd = info_span!("trend").entered();
    let mut config = config::load(&args.config)?;
    if let Some(metric) = args.metric {
        config.trend.metric = metric;
    }
    if let Some(output) = args.output {
        config.trend.output = output;
    }
    let metric = convert::parse_metric(&config.trend.metric)?;
    let (start, end) = convert::year_range(
        args.start_year.or(config.trend.start_year),
        args.end_year.or(config.trend.end_year),
        "trend",
    )?;
    let test = convert::build_trend_test(&config.trend)?;

    let archive = MetricsArchive::open(&config.metrics.output_dir).with_context(|| {
        format!(
            "failed to open record directory: {}",
            config.metrics.output_dir.display()
        )
    })?;
    let loaded = archive
        .load_range(start, end)
        .with_context(|| format!("failed to load water years {start}..={end}"))?;
    if loaded.grids.len() < 2 {
        bail!(
            "trend needs at least two annual records in {start}..={end}, found {}",
            loaded.grids.len()
        );
    }
    let years_missing = loaded.missing.len();
    let grid = assemble(metric, loaded.grids).context("failed to assemble water years")?;

    let trend = apply_trend(&grid, &test);
    write_trend_record(&config.trend.output, &trend, test.alpha()).with_context(|| {
        format!("failed to write trend record: {}", config.trend.output.display())
    })?;

    let summary = trend.summary(test.alpha());
    info!(
        metric = %metric,
        years = grid.n_years(),
        years_missing,
        cells = summary.cells,
        undefined = summary.undefined,
        significant = summary.significant,
        increasing = summary.significant_increasing,
        decreasing = summary.significant_decreasing,
        path = %config.trend.output.display(),
        "trend analysis finished"
    );
    Ok(())
}
