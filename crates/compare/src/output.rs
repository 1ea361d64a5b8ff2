//! JSON report of a period comparison.

use serde::Serialize;

use crate::aggregate::YearValue;
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::point::{PointAgreement, PointSeries};
use crate::segment::SegmentComparison;
use crate::summary::SummaryStats;

/// Top-level comparison output.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub metric: String,
    pub earlier_years: Vec<i32>,
    pub later_years: Vec<i32>,
    /// `[lat_min, lat_max, lon_min, lon_max]`, absent for the whole grid.
    pub region: Option<[f64; 4]>,
    pub floor: Option<f64>,
    pub n_cells: usize,
    pub n_valid: usize,
    pub earlier: SummaryStats,
    pub later: SummaryStats,
    pub difference: SummaryStats,
    pub percent_change: SummaryStats,
    /// Domain median per year, for each period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_medians: Option<SpatialMedians>,
    /// Series at a site, for each period.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sites: Vec<SiteReport>,
}

/// Domain-wide median series of both periods.
#[derive(Debug, Clone, Serialize)]
pub struct SpatialMedians {
    pub earlier: Vec<YearValue>,
    pub later: Vec<YearValue>,
}

/// Gridded series at one site and, with station data, their agreement.
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub name: String,
    pub earlier: PointSeries,
    pub later: PointSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<PointAgreement>,
}

impl ComparisonReport {
    /// Summarises `comparison`.
    pub fn new(comparison: &SegmentComparison, config: &CompareConfig) -> Self {
        Self {
            metric: comparison.metric.name().to_string(),
            earlier_years: comparison.earlier_years.clone(),
            later_years: comparison.later_years.clone(),
            region: config
                .region()
                .map(|r| [r.lat_min(), r.lat_max(), r.lon_min(), r.lon_max()]),
            floor: config.floor(),
            n_cells: comparison.n_cells(),
            n_valid: comparison.n_valid(),
            earlier: comparison.earlier_stats(),
            later: comparison.later_stats(),
            difference: comparison.difference_stats(),
            percent_change: comparison.percent_change_stats(),
            spatial_medians: None,
            sites: Vec::new(),
        }
    }

    /// Attaches the per-year domain medians of both periods.
    pub fn with_spatial_medians(mut self, earlier: Vec<YearValue>, later: Vec<YearValue>) -> Self {
        self.spatial_medians = Some(SpatialMedians { earlier, later });
        self
    }

    /// Attaches a site report.
    pub fn with_site(mut self, site: SiteReport) -> Self {
        self.sites.push(site);
        self
    }
}

/// Serialize a comparison report to a JSON string.
pub fn to_json(report: &ComparisonReport) -> Result<String, CompareError> {
    serde_json::to_string_pretty(report).map_err(|e| CompareError::Serialization {
        reason: e.to_string(),
    })
}
