use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Reads and parses the TOML configuration at `path`.
pub fn load(path: &Path) -> Result<Wd50Config> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Top-level wd50 configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Wd50Config {
    /// Daily grid input.
    #[serde(default)]
    pub source: SourceToml,

    /// Annual metric computation and the record directory.
    #[serde(default)]
    pub metrics: MetricsToml,

    /// Period comparison.
    #[serde(default)]
    pub compare: CompareToml,

    /// Per-cell trend analysis.
    #[serde(default)]
    pub trend: TrendToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceToml {
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
    #[serde(default)]
    pub request_interval_ms: u64,
    #[serde(default = "default_start_month")]
    pub start_month: u8,
}

impl Default for SourceToml {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            variable: default_variable(),
            work_dir: None,
            request_interval_ms: 0,
            start_month: default_start_month(),
        }
    }
}

fn default_variable() -> String {
    "ppt".to_string()
}
fn default_start_month() -> u8 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsToml {
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default = "default_wet_day_threshold")]
    pub wet_day_threshold: f64,
    #[serde(default = "default_percentile")]
    pub percentile: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for MetricsToml {
    fn default() -> Self {
        Self {
            start_year: None,
            end_year: None,
            wet_day_threshold: default_wet_day_threshold(),
            percentile: default_percentile(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_wet_day_threshold() -> f64 {
    1.0
}
fn default_percentile() -> f64 {
    95.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output/annual")
}

/// Which period's axes the other period is regridded onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePeriod {
    #[default]
    Earlier,
    Later,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareToml {
    #[serde(default = "default_metric")]
    pub metric: String,
    /// Inclusive `[start, end]` water years.
    #[serde(default)]
    pub earlier: Option<[i32; 2]>,
    #[serde(default)]
    pub later: Option<[i32; 2]>,
    #[serde(default)]
    pub reference: ReferencePeriod,
    /// `[lat_min, lat_max, lon_min, lon_max]`.
    #[serde(default)]
    pub region: Option<[f64; 4]>,
    /// Lower bound both period medians must exceed; `0` or less disables it.
    #[serde(default = "default_floor")]
    pub floor: Option<f64>,
    #[serde(default = "default_spatial_medians")]
    pub spatial_medians: bool,
    #[serde(default = "default_compare_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub sites: Vec<SiteToml>,
}

impl Default for CompareToml {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            earlier: None,
            later: None,
            reference: ReferencePeriod::default(),
            region: None,
            floor: default_floor(),
            spatial_medians: default_spatial_medians(),
            output: default_compare_output(),
            sites: Vec::new(),
        }
    }
}

fn default_metric() -> String {
    "wd50".to_string()
}
fn default_floor() -> Option<f64> {
    Some(0.5)
}
fn default_spatial_medians() -> bool {
    true
}
fn default_compare_output() -> PathBuf {
    PathBuf::from("output/compare.json")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteToml {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Daily `date,value` record of the station, if any.
    #[serde(default)]
    pub station_csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendToml {
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_trend_output")]
    pub output: PathBuf,
}

impl Default for TrendToml {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            start_year: None,
            end_year: None,
            alpha: default_alpha(),
            output: default_trend_output(),
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}
fn default_trend_output() -> PathBuf {
    PathBuf::from("output/trend.nc")
}
