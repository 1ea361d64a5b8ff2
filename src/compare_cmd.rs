//! Compare command: per-cell change of a metric between two periods.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use wd50_compare::{
    ComparisonReport, SiteReport, compare_segments, point_agreement, point_series,
    spatial_median_series, station_metric_series, to_json,
};
use wd50_io::{MetricsArchive, read_station_csv};
use wd50_metrics::{Metric, MetricsConfig};
use wd50_regrid::{MultiYearGrid, align_periods, assemble};

use crate::cli::CompareArgs;
use crate::config::{self, ReferencePeriod, SiteToml};
use crate::convert;

/// Run the period comparison.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();
    let mut config = config::load(&args.config)?;
    if let Some(metric) = args.metric {
        config.compare.metric = metric;
    }
    if let Some(output) = args.output {
        config.compare.output = output;
    }

    let metric = convert::parse_metric(&config.compare.metric)?;
    let earlier_range = convert::period(config.compare.earlier, "earlier")?;
    let later_range = convert::period(config.compare.later, "later")?;
    let compare_cfg = convert::build_compare_config(&config.compare)?;
    let metrics_cfg = convert::build_metrics_config(&config.metrics)?;

    let archive = MetricsArchive::open(&config.metrics.output_dir).with_context(|| {
        format!(
            "failed to open record directory: {}",
            config.metrics.output_dir.display()
        )
    })?;
    let earlier = load_period(&archive, metric, earlier_range, "earlier")?;
    let later = load_period(&archive, metric, later_range, "later")?;

    // Put both periods on the reference period's axes.
    let (earlier, later) = match config.compare.reference {
        ReferencePeriod::Later => {
            let (later, earlier) = align_periods(later, earlier)?.into_parts();
            (earlier, later)
        }
        ReferencePeriod::Earlier => align_periods(earlier, later)?.into_parts(),
    };

    let comparison =
        compare_segments(&earlier, &later, &compare_cfg).context("period comparison failed")?;
    let mut report = ComparisonReport::new(&comparison, &compare_cfg);

    if config.compare.spatial_medians {
        let (e, l) = match compare_cfg.region() {
            Some(region) => (earlier.subset(region)?, later.subset(region)?),
            None => (earlier.clone(), later.clone()),
        };
        report =
            report.with_spatial_medians(spatial_median_series(&e), spatial_median_series(&l));
    }

    for site in &config.compare.sites {
        let start_month = config.source.start_month;
        let site = site_report(site, &earlier, &later, metric, &metrics_cfg, start_month)?;
        report = report.with_site(site);
    }

    let json = to_json(&report)?;
    let output = &config.compare.output;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir: {}", parent.display()))?;
    }
    std::fs::write(output, json)
        .with_context(|| format!("failed to write report: {}", output.display()))?;

    info!(
        metric = %metric,
        cells = report.n_cells,
        valid = report.n_valid,
        median_change_pct = report.percent_change.median,
        path = %output.display(),
        "comparison written"
    );
    Ok(())
}

fn load_period(
    archive: &MetricsArchive,
    metric: Metric,
    (start, end): (i32, i32),
    name: &str,
) -> Result<MultiYearGrid> {
    let loaded = archive
        .load_range(start, end)
        .with_context(|| format!("failed to load {name} period {start}..={end}"))?;
    if loaded.grids.is_empty() {
        bail!("{name} period {start}..={end} has no annual records");
    }
    info!(
        period = name,
        start,
        end,
        years_loaded = loaded.grids.len(),
        years_missing = loaded.missing.len(),
        "period loaded"
    );
    assemble(metric, loaded.grids).with_context(|| format!("failed to assemble {name} period"))
}

fn site_report(
    site: &SiteToml,
    earlier: &MultiYearGrid,
    later: &MultiYearGrid,
    metric: Metric,
    metrics_cfg: &MetricsConfig,
    start_month: u8,
) -> Result<SiteReport> {
    let earlier_series = point_series(earlier, site.lat, site.lon);
    let later_series = point_series(later, site.lat, site.lon);

    let agreement = match &site.station_csv {
        Some(path) => {
            let days = read_station_csv(path)
                .with_context(|| format!("failed to read station {}", site.name))?;
            let station = station_metric_series(&days, metric, metrics_cfg, start_month)?;
            let gridded: Vec<_> = earlier_series
                .values
                .iter()
                .chain(&later_series.values)
                .copied()
                .collect();
            let agreement = point_agreement(&station, &gridded);
            if agreement.is_none() {
                warn!(site = %site.name, "station and grid share no valid year");
            }
            agreement
        }
        None => None,
    };

    Ok(SiteReport {
        name: site.name.clone(),
        earlier: earlier_series,
        later: later_series,
        agreement,
    })
}
