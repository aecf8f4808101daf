//! The complete dashboard output for one filter selection
//!
//! A report bundles the KPIs, every chart series and the callouts. It
//! renders as text for the console and serialises to JSON for a UI layer;
//! undefined means become `null` in JSON.

use std::fmt::Write as _;

use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::algorithm::dashboard::filters::{DateRange, VisitFilter};
use crate::algorithm::dashboard::heatmap::HeatGrid;
use crate::algorithm::dashboard::histogram::{Histogram, length_of_stay_histogram};
use crate::algorithm::dashboard::insights::{Insight, InsightThresholds, compute_insights};
use crate::algorithm::dashboard::metric::Metric;
use crate::algorithm::dashboard::sample::{CrowdingPoint, crowding_sample};
use crate::algorithm::dashboard::statistics::{
    DashboardStatistics, KpiSummary, format_count, format_decimal,
};
use crate::algorithm::dashboard::trend::{
    ComplaintComparison, TrendPoint, compare_by_complaint, daily_trend, metric_series,
};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::table::VisitTable;
use crate::models::types::{ArrivalMode, ChiefComplaint, Pod, TriageLevel, weekday_name};

/// Metric selectors of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricSelection {
    /// Metric emphasised in the daily trend
    pub primary: Metric,
    /// Metric compared across chief complaints
    pub comparison: Metric,
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self {
            primary: Metric::DoorToProvider,
            comparison: Metric::LengthOfStay,
        }
    }
}

/// The applied filter, in a stable order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    /// Inclusive arrival-date window
    pub date_range: DateRange,
    /// Selected triage levels, most acute first
    pub triage_levels: Vec<TriageLevel>,
    /// Selected chief complaints by label
    pub complaints: Vec<ChiefComplaint>,
    /// Selected arrival modes by label
    pub arrival_modes: Vec<ArrivalMode>,
    /// Selected pods by label
    pub pods: Vec<Pod>,
}

impl From<&VisitFilter> for FilterSummary {
    fn from(filter: &VisitFilter) -> Self {
        Self {
            date_range: filter.date_range,
            triage_levels: filter.triage_levels.iter().copied().sorted().collect(),
            complaints: filter
                .complaints
                .iter()
                .copied()
                .sorted_by_key(|c| c.label())
                .collect(),
            arrival_modes: filter
                .arrival_modes
                .iter()
                .copied()
                .sorted_by_key(|m| m.label())
                .collect(),
            pods: filter.pods.iter().copied().sorted_by_key(|p| p.label()).collect(),
        }
    }
}

/// Everything the dashboard shows for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Filter the report was computed for
    pub filter: FilterSummary,
    /// Metrics chosen for the trend and the comparison bars
    pub metrics: MetricSelection,
    /// Headline indicators
    pub kpis: KpiSummary,
    /// Daily averages in date order
    pub trend: Vec<TrendPoint>,
    /// Comparison metric per chief complaint, highest first
    pub comparison: Vec<ComplaintComparison>,
    /// Capped scatter sample of occupancy against door-to-provider
    pub crowding_sample: Vec<CrowdingPoint>,
    /// Length-of-stay distribution
    pub length_of_stay_histogram: Histogram,
    /// Mean door-to-provider by weekday and hour
    pub heat_grid: HeatGrid,
    /// Plain-language callouts
    pub insights: Vec<Insight>,
}

impl DashboardReport {
    /// Filter the table and compute every aggregate
    #[must_use]
    pub fn build(
        table: &VisitTable,
        filter: &VisitFilter,
        metrics: MetricSelection,
        config: &DashboardConfig,
    ) -> Self {
        let filtered = filter.apply(table.visits());
        info!("Filter kept {} of {} visits", filtered.len(), table.len());

        let kpis = DashboardStatistics::calculate_kpis(&filtered);
        let trend = daily_trend(&filtered);
        let comparison = compare_by_complaint(&filtered, metrics.comparison);
        let crowding_sample = crowding_sample(&filtered, config.sample_cap, config.sample_seed);
        let length_of_stay_histogram = length_of_stay_histogram(&filtered, config.histogram_bins);
        let heat_grid = HeatGrid::from_visits(&filtered);
        let insights = compute_insights(
            &filtered,
            table.has_flu_wave_flag(),
            &InsightThresholds::from(config),
        );
        debug!(
            "Report: {} trend days, {} complaint groups, {} sampled points, {} insights",
            trend.len(),
            comparison.len(),
            crowding_sample.len(),
            insights.len()
        );

        Self {
            filter: FilterSummary::from(filter),
            metrics,
            kpis,
            trend,
            comparison,
            crowding_sample,
            length_of_stay_histogram,
            heat_grid,
            insights,
        }
    }

    /// Trend projected on the primary metric
    #[must_use]
    pub fn primary_series(&self) -> Vec<(NaiveDate, f64)> {
        metric_series(&self.trend, self.metrics.primary)
    }

    /// Serialise as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the report as console text
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let range = &self.filter.date_range;
        writeln!(out, "ED Flow Monitor: Wait Times, LOS, and LWBS")?;
        writeln!(out, "Date range: {} to {}", range.start, range.end)?;
        writeln!(out)?;
        out.push_str(&DashboardStatistics::generate_summary(&self.kpis));

        writeln!(out)?;
        writeln!(out, "Daily Trend: {}", self.metrics.primary.label())?;
        if self.trend.is_empty() {
            writeln!(out, "  no data")?;
        }
        for (date, value) in self.primary_series() {
            writeln!(out, "  {date}  {:>10}", format_decimal(value))?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Comparison by Chief Complaint: Avg {}",
            self.metrics.comparison
        )?;
        if self.comparison.is_empty() {
            writeln!(out, "  no data")?;
        }
        for bar in &self.comparison {
            writeln!(
                out,
                "  {:<16}{:>10}  ({} visits)",
                bar.chief_complaint.label(),
                format_decimal(bar.value),
                format_count(bar.visits)
            )?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Crowding Relationship: {} sampled points",
            format_count(self.crowding_sample.len())
        )?;

        writeln!(out)?;
        writeln!(out, "LOS Distribution (min)")?;
        if self.length_of_stay_histogram.is_empty() {
            writeln!(out, "  no data")?;
        }
        let last = self.length_of_stay_histogram.bins.len().saturating_sub(1);
        for (idx, bin) in self.length_of_stay_histogram.bins.iter().enumerate() {
            writeln!(
                out,
                "  [{:>7}, {:>7}{}  {}",
                format_decimal(bin.lower),
                format_decimal(bin.upper),
                if idx == last { ']' } else { ')' },
                bin.count
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Staffing Signal: highest mean Door→Provider (min) by day and hour")?;
        let busiest = self.heat_grid.busiest_slots(5);
        if busiest.is_empty() {
            writeln!(out, "  no data")?;
        }
        for (day, hour, cell) in busiest {
            writeln!(
                out,
                "  {:<10}{hour:02}:00  {:>8}  ({} visits)",
                weekday_name(day),
                format_decimal(cell.mean_wait),
                cell.visits
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Quick Insights")?;
        if self.insights.is_empty() {
            writeln!(out, "  none")?;
        }
        for insight in &self.insights {
            writeln!(out, "  - {insight}")?;
        }
        Ok(())
    }
}
