//! Pure conversion functions: TOML config structs -> crate API config types.

use std::time::Duration;

use anyhow::{Context, Result, bail};

use wd50_compare::CompareConfig;
use wd50_grid::Region;
use wd50_metrics::{Metric, MetricsConfig};
use wd50_stack::StackConfig;
use wd50_trend::MannKendall;

use crate::config::*;

/// Parses a metric name such as `wd50` or `r95ptot_frac`.
pub fn parse_metric(s: &str) -> Result<Metric> {
    s.parse::<Metric>().with_context(|| format!("invalid metric name {s:?}"))
}

/// Resolves an inclusive water-year range from CLI overrides and config.
pub fn year_range(start: Option<i32>, end: Option<i32>, section: &str) -> Result<(i32, i32)> {
    let (Some(start), Some(end)) = (start, end) else {
        bail!(
            "no water-year range: set [{section}].start_year and end_year \
             or pass --start-year/--end-year"
        );
    };
    if start > end {
        bail!("start year {start} is after end year {end}");
    }
    Ok((start, end))
}

/// Converts a `[start, end]` pair from the `[compare]` section.
pub fn period(range: Option<[i32; 2]>, name: &str) -> Result<(i32, i32)> {
    let Some([start, end]) = range else {
        bail!("no {name} period: set [compare].{name} = [start, end]");
    };
    year_range(Some(start), Some(end), "compare")
}

/// Builds a [`StackConfig`] from the `[source]` section.
pub fn build_stack_config(source: &SourceToml) -> Result<StackConfig> {
    let mut cfg = StackConfig::new(&source.variable)
        .with_start_month(source.start_month)
        .with_request_interval(Duration::from_millis(source.request_interval_ms));
    if let Some(ref dir) = source.work_dir {
        cfg = cfg.with_work_root(dir);
    }
    cfg.validate().context("invalid [source] configuration")?;
    Ok(cfg)
}

/// Builds a [`MetricsConfig`] from the `[metrics]` section.
pub fn build_metrics_config(metrics: &MetricsToml) -> Result<MetricsConfig> {
    let cfg = MetricsConfig::new()
        .with_wet_day_threshold(metrics.wet_day_threshold)
        .with_percentile(metrics.percentile);
    cfg.validate().context("invalid [metrics] configuration")?;
    Ok(cfg)
}

/// Builds a [`CompareConfig`] from the `[compare]` section.
///
/// A floor of zero or less is treated as no floor.
pub fn build_compare_config(compare: &CompareToml) -> Result<CompareConfig> {
    let mut cfg = CompareConfig::new();
    if let Some([lat_min, lat_max, lon_min, lon_max]) = compare.region {
        let region = Region::new(lat_min, lat_max, lon_min, lon_max)
            .context("invalid [compare].region")?;
        cfg = cfg.with_region(region);
    }
    if let Some(floor) = compare.floor.filter(|f| *f > 0.0) {
        cfg = cfg.with_floor(floor);
    }
    cfg.validate().context("invalid [compare] configuration")?;
    Ok(cfg)
}

/// Builds the Mann-Kendall test from the `[trend]` section.
pub fn build_trend_test(trend: &TrendToml) -> Result<MannKendall> {
    MannKendall::new(trend.alpha).context("invalid [trend].alpha")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_metric_names() {
        assert_eq!(parse_metric("wd50").unwrap(), Metric::Wd50);
        assert_eq!(parse_metric("R95pTOT_frac").unwrap(), Metric::R95ptotFrac);
        assert!(parse_metric("sdii").is_err());
    }

    #[test]
    fn year_range_requires_both_ends_in_order() {
        assert_eq!(year_range(Some(1982), Some(2024), "metrics").unwrap(), (1982, 2024));
        assert!(year_range(Some(1982), None, "metrics").is_err());
        assert!(year_range(Some(2000), Some(1999), "metrics").is_err());
        assert!(period(None, "earlier").is_err());
        assert_eq!(period(Some([2003, 2024]), "later").unwrap(), (2003, 2024));
    }

    #[test]
    fn compare_config_from_defaults() {
        let cfg = build_compare_config(&CompareToml::default()).unwrap();
        assert_eq!(cfg.floor(), Some(0.5));
        assert!(cfg.region().is_none());
    }

    #[test]
    fn non_positive_floor_disables_it() {
        let toml = CompareToml {
            floor: Some(0.0),
            region: Some([32.54, 42.0, -125.0, -113.05]),
            ..CompareToml::default()
        };
        let cfg = build_compare_config(&toml).unwrap();
        assert!(cfg.floor().is_none());
        assert!(cfg.region().is_some());
    }

    #[test]
    fn inverted_region_is_rejected() {
        let toml = CompareToml {
            region: Some([42.0, 32.54, -125.0, -113.05]),
            ..CompareToml::default()
        };
        assert!(build_compare_config(&toml).is_err());
    }

    #[test]
    fn metrics_and_trend_defaults_are_valid() {
        let m = build_metrics_config(&MetricsToml::default()).unwrap();
        assert_eq!(m.wet_day_threshold(), 1.0);
        assert_eq!(build_trend_test(&TrendToml::default()).unwrap().alpha(), 0.05);
        let bad = TrendToml {
            alpha: 1.5,
            ..TrendToml::default()
        };
        assert!(build_trend_test(&bad).is_err());
    }

    #[test]
    fn stack_config_from_source() {
        let cfg = build_stack_config(&SourceToml::default()).unwrap();
        assert_eq!(cfg.variable(), "ppt");
        assert_eq!(cfg.start_month(), 10);
        assert!(cfg.work_root().is_none());
    }
}
