//! Daily trend and per-complaint comparison series

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::dashboard::metric::Metric;
use crate::models::types::ChiefComplaint;
use crate::models::visit::Visit;

/// Running sums of the three metrics over a group of visits
#[derive(Debug, Clone, Copy, Default)]
struct MetricSums {
    door_to_provider: f64,
    length_of_stay: f64,
    occupancy: f64,
    visits: usize,
}

impl MetricSums {
    fn add(&mut self, visit: &Visit) {
        self.door_to_provider += Metric::DoorToProvider.value(visit);
        self.length_of_stay += Metric::LengthOfStay.value(visit);
        self.occupancy += Metric::BedOccupancy.value(visit);
        self.visits += 1;
    }

    fn mean(self, sum: f64) -> f64 {
        sum / self.visits as f64
    }
}

/// One day of the trend series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Arrival date
    pub date: NaiveDate,
    /// Mean door-to-provider time
    pub avg_door_to_provider: f64,
    /// Mean length of stay
    pub avg_length_of_stay: f64,
    /// Mean bed occupancy
    pub avg_occupancy: f64,
    /// Visits that day
    pub visits: usize,
}

impl TrendPoint {
    /// The day's mean of one metric
    #[must_use]
    pub const fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::DoorToProvider => self.avg_door_to_provider,
            Metric::LengthOfStay => self.avg_length_of_stay,
            Metric::BedOccupancy => self.avg_occupancy,
        }
    }
}

/// Per-day means of the three metrics, ascending by date
///
/// Days without visits are absent from the series.
#[must_use]
pub fn daily_trend(visits: &[Visit]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, MetricSums> = BTreeMap::new();
    for visit in visits {
        by_date.entry(visit.arrival_date()).or_default().add(visit);
    }

    by_date
        .into_iter()
        .map(|(date, sums)| TrendPoint {
            date,
            avg_door_to_provider: sums.mean(sums.door_to_provider),
            avg_length_of_stay: sums.mean(sums.length_of_stay),
            avg_occupancy: sums.mean(sums.occupancy),
            visits: sums.visits,
        })
        .collect()
}

/// Project a trend onto one metric as `(date, mean)` pairs
#[must_use]
pub fn metric_series(trend: &[TrendPoint], metric: Metric) -> Vec<(NaiveDate, f64)> {
    trend.iter().map(|p| (p.date, p.value(metric))).collect()
}

/// One bar of the chief complaint comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplaintComparison {
    /// Chief complaint
    pub chief_complaint: ChiefComplaint,
    /// Mean of the compared metric
    pub value: f64,
    /// Visits with this complaint
    pub visits: usize,
}

/// Mean of `metric` per chief complaint, descending by mean
///
/// Complaints with equal means keep label order.
#[must_use]
pub fn compare_by_complaint(visits: &[Visit], metric: Metric) -> Vec<ComplaintComparison> {
    let mut groups: FxHashMap<ChiefComplaint, (f64, usize)> = FxHashMap::default();
    for visit in visits {
        let entry = groups.entry(visit.chief_complaint).or_insert((0.0, 0));
        entry.0 += metric.value(visit);
        entry.1 += 1;
    }

    let mut comparison: Vec<ComplaintComparison> = groups
        .into_iter()
        .map(|(chief_complaint, (sum, count))| ComplaintComparison {
            chief_complaint,
            value: sum / count as f64,
            visits: count,
        })
        .collect();
    comparison.sort_by_key(|c| c.chief_complaint.label());
    comparison.sort_by(|a, b| b.value.total_cmp(&a.value));
    comparison
}
