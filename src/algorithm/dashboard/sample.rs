//! Bounded scatter sample for the crowding chart

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::Serialize;

use crate::models::types::{ArrivalMode, ChiefComplaint, Disposition, Pod, TriageLevel};
use crate::models::visit::Visit;

/// One point of the occupancy versus door-to-provider scatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrowdingPoint {
    /// Source visit
    pub visit_id: u64,
    /// Occupancy at arrival (x axis)
    pub bed_occupancy_pct: f64,
    /// Wait for a provider (y axis)
    pub door_to_provider_min: u32,
    /// Point colour
    pub triage_level: TriageLevel,
    /// Hover detail
    pub chief_complaint: ChiefComplaint,
    /// Hover detail
    pub arrival_mode: ArrivalMode,
    /// Hover detail
    pub pod: Pod,
    /// Hover detail
    pub disposition: Disposition,
}

impl From<&Visit> for CrowdingPoint {
    fn from(visit: &Visit) -> Self {
        Self {
            visit_id: visit.visit_id,
            bed_occupancy_pct: visit.bed_occupancy_pct,
            door_to_provider_min: visit.door_to_provider_min,
            triage_level: visit.triage_level,
            chief_complaint: visit.chief_complaint,
            arrival_mode: visit.arrival_mode,
            pod: visit.pod,
            disposition: visit.disposition,
        }
    }
}

/// Sample at most `cap` visits without replacement
///
/// Every visit is kept when the set fits under the cap. Otherwise the
/// indices are drawn from a `StdRng` seeded with `seed` and returned in
/// input order, so the same set and seed always give the same sample.
#[must_use]
pub fn crowding_sample(visits: &[Visit], cap: usize, seed: u64) -> Vec<CrowdingPoint> {
    if visits.len() <= cap {
        return visits.iter().map(CrowdingPoint::from).collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = index::sample(&mut rng, visits.len(), cap).into_vec();
    picked.sort_unstable();
    picked
        .into_iter()
        .map(|idx| CrowdingPoint::from(&visits[idx]))
        .collect()
}
