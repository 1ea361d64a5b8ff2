//! Comparison of two periods of an annual metric.
//!
//! Both periods must already be on identical axes (see
//! [`wd50_regrid::align_periods`]). Each is reduced to a per-cell median
//! across its years; cells valid in both periods form the mask on which the
//! difference and percent change are defined.
//!
//! The crate also carries the smaller diagnostics used alongside a
//! comparison: per-year domain medians, nearest-cell series at a site and
//! their agreement with station observations.

mod aggregate;
mod config;
mod error;
mod mask;
mod output;
mod point;
mod segment;
mod station;
mod summary;

pub use aggregate::{YearValue, spatial_median_series, temporal_median};
pub use config::CompareConfig;
pub use error::CompareError;
pub use mask::{difference, percent_change, validity_mask};
pub use output::{ComparisonReport, SiteReport, SpatialMedians, to_json};
pub use point::{PointAgreement, PointSeries, point_agreement, point_series};
pub use segment::{SegmentComparison, compare_segments};
pub use station::station_metric_series;
pub use summary::SummaryStats;
