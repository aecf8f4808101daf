//! Headline KPIs over the filtered visits
//!
//! Every mean and rate is NaN when no visit passes the filter; the text
//! cards render such values as `n/a`.

use serde::Serialize;

use crate::algorithm::dashboard::metric::{Metric, mean, metric_mean};
use crate::models::visit::Visit;

/// The six KPI cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Number of filtered visits
    pub visits: usize,
    /// Mean door-to-provider time in minutes
    pub avg_door_to_provider: f64,
    /// Mean length of stay in minutes
    pub avg_length_of_stay: f64,
    /// Mean bed occupancy in percent
    pub avg_occupancy: f64,
    /// Percentage of visits that left without being seen
    pub lwbs_rate: f64,
    /// Percentage of visits that were admitted
    pub admission_rate: f64,
}

impl KpiSummary {
    /// Whether the summary covers no visits
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.visits == 0
    }

    /// Mean of a metric as held in the summary
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::DoorToProvider => self.avg_door_to_provider,
            Metric::LengthOfStay => self.avg_length_of_stay,
            Metric::BedOccupancy => self.avg_occupancy,
        }
    }
}

/// Functions for dashboard statistics and summaries
pub struct DashboardStatistics;

impl DashboardStatistics {
    /// Calculate the KPIs of a filtered set
    #[must_use]
    pub fn calculate_kpis(visits: &[Visit]) -> KpiSummary {
        KpiSummary {
            visits: visits.len(),
            avg_door_to_provider: metric_mean(visits, Metric::DoorToProvider),
            avg_length_of_stay: metric_mean(visits, Metric::LengthOfStay),
            avg_occupancy: metric_mean(visits, Metric::BedOccupancy),
            lwbs_rate: percentage(visits, Visit::left_without_being_seen),
            admission_rate: percentage(visits, Visit::admitted),
        }
    }

    /// Render the KPI cards as text
    #[must_use]
    pub fn generate_summary(kpis: &KpiSummary) -> String {
        let mut summary = String::new();
        summary.push_str("Key Indicators:\n");
        summary.push_str(&format!("  Visits: {}\n", format_count(kpis.visits)));
        summary.push_str(&format!(
            "  {}: {}\n",
            Metric::DoorToProvider.label(),
            format_decimal(kpis.avg_door_to_provider)
        ));
        summary.push_str(&format!(
            "  {}: {}\n",
            Metric::LengthOfStay.label(),
            format_decimal(kpis.avg_length_of_stay)
        ));
        summary.push_str(&format!(
            "  {}: {}\n",
            Metric::BedOccupancy.label(),
            format_decimal(kpis.avg_occupancy)
        ));
        summary.push_str(&format!("  LWBS Rate: {}\n", format_percent(kpis.lwbs_rate)));
        summary.push_str(&format!(
            "  Admission Rate: {}\n",
            format_percent(kpis.admission_rate)
        ));
        summary
    }
}

fn percentage(visits: &[Visit], predicate: fn(&Visit) -> bool) -> f64 {
    mean(visits.iter().map(|v| if predicate(v) { 100.0 } else { 0.0 }))
}

/// Integer with thousands separators (`12,345`)
#[must_use]
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// One decimal with thousands separators, `n/a` when undefined
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let formatted = format!("{:.1}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "0"));
    let sign = if value < 0.0 && formatted != "0.0" { "-" } else { "" };
    format!("{sign}{}.{fraction}", group_thousands(whole))
}

/// One decimal followed by `%`, `n/a` when undefined
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{}%", format_decimal(value))
    } else {
        "n/a".to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
