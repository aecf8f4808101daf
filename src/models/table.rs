//! Immutable visit table
//!
//! The table is loaded once per session and shared read-only between every
//! dashboard interaction.

use std::sync::Arc;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::models::types::{ArrivalMode, ChiefComplaint, Pod, TriageLevel};
use crate::models::visit::Visit;

/// The full set of visits of one data file
#[derive(Debug, Clone)]
pub struct VisitTable {
    visits: Arc<[Visit]>,
    has_flu_wave_flag: bool,
}

impl VisitTable {
    /// Wrap a set of visits
    ///
    /// `has_flu_wave_flag` records whether the source carried the
    /// `flu_wave_flag` column; generated tables always do.
    #[must_use]
    pub fn new(visits: Vec<Visit>, has_flu_wave_flag: bool) -> Self {
        Self {
            visits: visits.into(),
            has_flu_wave_flag,
        }
    }

    /// All visits, in file order
    #[must_use]
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of visits
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether the table holds no visits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Whether the source carried the flu-wave flag column
    #[must_use]
    pub const fn has_flu_wave_flag(&self) -> bool {
        self.has_flu_wave_flag
    }

    /// Earliest and latest arrival date, `None` for an empty table
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.visits
            .iter()
            .map(Visit::arrival_date)
            .minmax()
            .into_option()
    }

    /// Distinct triage levels present, ascending
    #[must_use]
    pub fn triage_options(&self) -> Vec<TriageLevel> {
        self.visits
            .iter()
            .map(|v| v.triage_level)
            .unique()
            .sorted()
            .collect()
    }

    /// Distinct chief complaints present, sorted by label
    #[must_use]
    pub fn complaint_options(&self) -> Vec<ChiefComplaint> {
        self.visits
            .iter()
            .map(|v| v.chief_complaint)
            .unique()
            .sorted_by_key(|c| c.label())
            .collect()
    }

    /// Distinct arrival modes present, sorted by label
    #[must_use]
    pub fn arrival_mode_options(&self) -> Vec<ArrivalMode> {
        self.visits
            .iter()
            .map(|v| v.arrival_mode)
            .unique()
            .sorted_by_key(|m| m.label())
            .collect()
    }

    /// Distinct pods present, sorted by label
    #[must_use]
    pub fn pod_options(&self) -> Vec<Pod> {
        self.visits
            .iter()
            .map(|v| v.pod)
            .unique()
            .sorted_by_key(|p| p.label())
            .collect()
    }
}

impl From<Vec<Visit>> for VisitTable {
    fn from(visits: Vec<Visit>) -> Self {
        Self::new(visits, true)
    }
}
