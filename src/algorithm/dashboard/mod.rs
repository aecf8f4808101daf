//! Filter and aggregate engine of the dashboard
//!
//! Every interaction filters the immutable visit table and recomputes the
//! KPIs, chart series and insight callouts from the filtered set.

pub mod filters;
pub mod heatmap;
pub mod histogram;
pub mod insights;
pub mod metric;
pub mod report;
pub mod sample;
pub mod statistics;
pub mod trend;

pub use filters::{DateRange, FilterCriteria, FilterOptions, VisitFilter};
pub use heatmap::{HeatCell, HeatGrid, HeatRow};
pub use histogram::{Histogram, HistogramBin, length_of_stay_histogram};
pub use insights::{Insight, InsightThresholds, compute_insights};
pub use metric::Metric;
pub use report::{DashboardReport, FilterSummary, MetricSelection};
pub use sample::{CrowdingPoint, crowding_sample};
pub use statistics::{DashboardStatistics, KpiSummary};
pub use trend::{ComplaintComparison, TrendPoint, compare_by_complaint, daily_trend, metric_series};
