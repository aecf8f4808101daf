//! Visit filtering criteria
//!
//! A visit passes the dashboard filter when its arrival date falls inside
//! the selected range and each of its four categories is in the matching
//! selection. An empty selection matches nothing.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::models::table::VisitTable;
use crate::models::types::{ArrivalMode, ChiefComplaint, Pod, TriageLevel};
use crate::models::visit::Visit;

/// Defines a criterion for filtering entities
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// Inclusive range of arrival dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First date included
    pub start: NaiveDate,
    /// Last date included
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; a start after the end matches nothing
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range covering every representable date
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    /// Whether `date` lies in the range, both ends included
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Resolve optional bounds against the table, falling back to its first
    /// and last arrival date
    #[must_use]
    pub fn resolve(table: &VisitTable, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let bounds = table.date_bounds();
        let start = start.or(bounds.map(|(min, _)| min)).unwrap_or(NaiveDate::MIN);
        let end = end.or(bounds.map(|(_, max)| max)).unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }
}

/// Values offered by the dashboard's filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Triage levels present, ascending
    pub triage_levels: Vec<TriageLevel>,
    /// Chief complaints present, by label
    pub complaints: Vec<ChiefComplaint>,
    /// Arrival modes present, by label
    pub arrival_modes: Vec<ArrivalMode>,
    /// Pods present, by label
    pub pods: Vec<Pod>,
    /// First and last arrival date
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl FilterOptions {
    /// Collect the options of a table
    #[must_use]
    pub fn from_table(table: &VisitTable) -> Self {
        Self {
            triage_levels: table.triage_options(),
            complaints: table.complaint_options(),
            arrival_modes: table.arrival_mode_options(),
            pods: table.pod_options(),
            date_bounds: table.date_bounds(),
        }
    }
}

/// The dashboard filter: a date range and four set-membership selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitFilter {
    /// Inclusive arrival date range
    pub date_range: DateRange,
    /// Selected triage levels
    pub triage_levels: FxHashSet<TriageLevel>,
    /// Selected chief complaints
    pub complaints: FxHashSet<ChiefComplaint>,
    /// Selected arrival modes
    pub arrival_modes: FxHashSet<ArrivalMode>,
    /// Selected pods
    pub pods: FxHashSet<Pod>,
}

impl VisitFilter {
    /// Filter with empty selections over an unbounded range; matches nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            date_range: DateRange::unbounded(),
            triage_levels: FxHashSet::default(),
            complaints: FxHashSet::default(),
            arrival_modes: FxHashSet::default(),
            pods: FxHashSet::default(),
        }
    }

    /// Filter that selects every option present in the table over its full
    /// date range
    #[must_use]
    pub fn select_all(table: &VisitTable) -> Self {
        let options = FilterOptions::from_table(table);
        Self {
            date_range: DateRange::resolve(table, None, None),
            triage_levels: options.triage_levels.into_iter().collect(),
            complaints: options.complaints.into_iter().collect(),
            arrival_modes: options.arrival_modes.into_iter().collect(),
            pods: options.pods.into_iter().collect(),
        }
    }

    /// Replace the date range
    #[must_use]
    pub const fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Replace the triage selection
    #[must_use]
    pub fn with_triage_levels(mut self, levels: impl IntoIterator<Item = TriageLevel>) -> Self {
        self.triage_levels = levels.into_iter().collect();
        self
    }

    /// Replace the chief complaint selection
    #[must_use]
    pub fn with_complaints(mut self, complaints: impl IntoIterator<Item = ChiefComplaint>) -> Self {
        self.complaints = complaints.into_iter().collect();
        self
    }

    /// Replace the arrival mode selection
    #[must_use]
    pub fn with_arrival_modes(mut self, modes: impl IntoIterator<Item = ArrivalMode>) -> Self {
        self.arrival_modes = modes.into_iter().collect();
        self
    }

    /// Replace the pod selection
    #[must_use]
    pub fn with_pods(mut self, pods: impl IntoIterator<Item = Pod>) -> Self {
        self.pods = pods.into_iter().collect();
        self
    }

    /// Visits that pass the filter, in input order
    #[must_use]
    pub fn apply(&self, visits: &[Visit]) -> Vec<Visit> {
        visits
            .iter()
            .filter(|v| self.meets_criteria(v))
            .copied()
            .collect()
    }
}

impl FilterCriteria<Visit> for VisitFilter {
    fn meets_criteria(&self, visit: &Visit) -> bool {
        self.date_range.contains(visit.arrival_date())
            && self.triage_levels.contains(&visit.triage_level)
            && self.complaints.contains(&visit.chief_complaint)
            && self.arrival_modes.contains(&visit.arrival_mode)
            && self.pods.contains(&visit.pod)
    }
}
