//! Causal model of the synthetic emergency department
//!
//! Arrival hour and calendar drive crowding, crowding drives waiting, and
//! waiting plus acuity drive the disposition. Every function here is pure;
//! the random inputs (uniform draws and scaled Gaussian noise) are supplied
//! by the generator so the draw order stays in one place.

use crate::models::types::{AgeGroup, ArrivalMode, ChiefComplaint, Disposition, Pod, TriageLevel};
use crate::models::visit::{DOOR_TO_PROVIDER_BOUNDS, LENGTH_OF_STAY_BOUNDS, OCCUPANCY_BOUNDS};

/// Minutes in one day
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Standard deviation of the occupancy noise, percentage points
pub const OCCUPANCY_NOISE_SD: f64 = 6.0;
/// Standard deviation of the door-to-provider noise, minutes
pub const DOOR_TO_PROVIDER_NOISE_SD: f64 = 8.0;
/// Standard deviation of the length-of-stay noise, minutes
pub const LENGTH_OF_STAY_NOISE_SD: f64 = 25.0;

/// Chance that a high-acuity patient arrives by ambulance
pub const HIGH_ACUITY_AMBULANCE_PROB: f64 = 0.65;
/// Chance that any patient is brought in by EMS regardless of acuity
pub const EMS_OVERRIDE_PROB: f64 = 0.08;

/// Upper bound of the labs-ordered probability
pub const MAX_LABS_PROB: f64 = 0.95;
/// Upper bound of the imaging-ordered probability
pub const MAX_IMAGING_PROB: f64 = 0.90;
/// Upper bound of the LWBS probability
pub const MAX_LWBS_PROB: f64 = 0.40;

/// Age band distribution
pub const AGE_GROUP_WEIGHTS: [(AgeGroup, f64); 5] = [
    (AgeGroup::Child, 0.10),
    (AgeGroup::YoungAdult, 0.30),
    (AgeGroup::Adult, 0.22),
    (AgeGroup::OlderAdult, 0.20),
    (AgeGroup::Senior, 0.18),
];

/// Triage distribution: mostly 3s and 4s, few 1s
pub const TRIAGE_WEIGHTS: [(TriageLevel, f64); 5] = [
    (TriageLevel::Resuscitation, 0.03),
    (TriageLevel::Emergent, 0.12),
    (TriageLevel::Urgent, 0.45),
    (TriageLevel::LessUrgent, 0.30),
    (TriageLevel::NonUrgent, 0.10),
];

/// Pod assignment distribution
pub const POD_WEIGHTS: [(Pod, f64); 3] = [(Pod::PodA, 0.34), (Pod::PodB, 0.33), (Pod::PodC, 0.33)];

/// Chief complaint distribution outside the flu wave
pub const BASELINE_COMPLAINT_WEIGHTS: [(ChiefComplaint, f64); 6] = [
    (ChiefComplaint::ChestPain, 0.10),
    (ChiefComplaint::AbdominalPain, 0.18),
    (ChiefComplaint::Injury, 0.22),
    (ChiefComplaint::FeverResp, 0.16),
    (ChiefComplaint::Headache, 0.08),
    (ChiefComplaint::Other, 0.26),
];

/// Chief complaint distribution during the flu wave: more Fever/Resp, less Injury
pub const FLU_WAVE_COMPLAINT_WEIGHTS: [(ChiefComplaint, f64); 6] = [
    (ChiefComplaint::ChestPain, 0.09),
    (ChiefComplaint::AbdominalPain, 0.16),
    (ChiefComplaint::Injury, 0.16),
    (ChiefComplaint::FeverResp, 0.28),
    (ChiefComplaint::Headache, 0.07),
    (ChiefComplaint::Other, 0.24),
];

/// Closed interval of day indices that form the flu-wave anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluWaveWindow {
    /// First day index inside the window
    pub first_day: i64,
    /// Last day index inside the window
    pub last_day: i64,
}

impl FluWaveWindow {
    /// Whether a day index (days since the start date) falls in the window
    #[must_use]
    pub const fn contains(&self, day_index: i64) -> bool {
        day_index >= self.first_day && day_index <= self.last_day
    }
}

/// Days 35 through 55 after the start date
pub const FLU_WAVE_WINDOW: FluWaveWindow = FluWaveWindow {
    first_day: 35,
    last_day: 55,
};

#[inline]
fn indicator(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

#[inline]
fn gaussian_bump(hour: f64, center: f64, width: f64) -> f64 {
    (-((hour - center) / width).powi(2)).exp()
}

/// Arrival intensity by hour: evening peak at 18h, late-morning peak at 10h
#[must_use]
pub fn hour_intensity(hour: u32) -> f64 {
    let h = f64::from(hour);
    0.7 * gaussian_bump(h, 18.0, 4.5) + 0.4 * gaussian_bump(h, 10.0, 4.0) + 0.10
}

/// Logistic function
#[must_use]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Bed occupancy in percent, clipped to [35, 98] and rounded to one decimal
///
/// `noise` is the already-scaled Gaussian term.
#[must_use]
pub fn bed_occupancy(
    intensity: f64,
    max_intensity: f64,
    weekend: bool,
    flu_wave: bool,
    noise: f64,
) -> f64 {
    let (min, max) = OCCUPANCY_BOUNDS;
    let raw = 55.0
        + 30.0 * (intensity / max_intensity)
        + 6.0 * indicator(weekend)
        + 10.0 * indicator(flu_wave)
        + noise;
    (raw.clamp(min, max) * 10.0).round_ties_even() / 10.0
}

/// Arrival mode from the acuity-driven draw and the EMS override draw
#[must_use]
pub fn arrival_mode(
    triage: TriageLevel,
    acuity_draw: f64,
    override_draw: f64,
) -> ArrivalMode {
    if override_draw < EMS_OVERRIDE_PROB
        || (triage.is_high_acuity() && acuity_draw < HIGH_ACUITY_AMBULANCE_PROB)
    {
        ArrivalMode::Ambulance
    } else {
        ArrivalMode::WalkIn
    }
}

/// Probability that labs are ordered
#[must_use]
pub fn labs_probability(triage: TriageLevel, complaint: ChiefComplaint) -> f64 {
    let p = 0.20
        + 0.15 * indicator(triage.is_high_acuity())
        + 0.10 * indicator(triage == TriageLevel::Urgent)
        + 0.08 * indicator(complaint == ChiefComplaint::ChestPain)
        + 0.06 * indicator(complaint == ChiefComplaint::FeverResp);
    p.clamp(0.0, MAX_LABS_PROB)
}

/// Probability that imaging is ordered
#[must_use]
pub fn imaging_probability(triage: TriageLevel, complaint: ChiefComplaint) -> f64 {
    let p = 0.12
        + 0.14 * indicator(complaint == ChiefComplaint::Injury)
        + 0.10 * indicator(complaint == ChiefComplaint::ChestPain)
        + 0.06 * indicator(triage.is_high_acuity());
    p.clamp(0.0, MAX_IMAGING_PROB)
}

/// Door-to-provider minutes: crowding and the flu wave slow it, acuity speeds it
#[must_use]
pub fn door_to_provider(occupancy: f64, flu_wave: bool, triage: TriageLevel, noise: f64) -> u32 {
    let (min, max) = DOOR_TO_PROVIDER_BOUNDS;
    let raw = 18.0 + 0.55 * (occupancy - 60.0) + 6.0 * indicator(flu_wave)
        - 8.0 * indicator(triage.is_high_acuity())
        - 3.0 * indicator(triage == TriageLevel::Urgent)
        + noise;
    // Clamped to a small positive range, so the cast is exact
    raw.clamp(f64::from(min), f64::from(max)).round_ties_even() as u32
}

/// Length of stay in minutes
#[must_use]
pub fn length_of_stay(
    occupancy: f64,
    labs_ordered: bool,
    imaging_ordered: bool,
    triage: TriageLevel,
    flu_wave: bool,
    noise: f64,
) -> u32 {
    let (min, max) = LENGTH_OF_STAY_BOUNDS;
    let raw = 110.0 + 0.45 * (occupancy - 60.0) + noise
        + 55.0 * indicator(labs_ordered)
        + 65.0 * indicator(imaging_ordered)
        + 70.0 * indicator(triage.is_high_acuity())
        + 15.0 * indicator(triage == TriageLevel::Urgent)
        + 15.0 * indicator(flu_wave);
    raw.clamp(f64::from(min), f64::from(max)).round_ties_even() as u32
}

/// Probability of admission
#[must_use]
pub fn admit_probability(
    triage: TriageLevel,
    complaint: ChiefComplaint,
    age_group: AgeGroup,
    occupancy: f64,
) -> f64 {
    let score = -2.0
        + 1.5 * indicator(triage.is_high_acuity())
        + 0.7 * indicator(triage == TriageLevel::Urgent)
        + 0.6 * indicator(complaint == ChiefComplaint::ChestPain)
        + 0.5 * indicator(complaint == ChiefComplaint::FeverResp)
        + 0.6 * indicator(age_group == AgeGroup::Senior)
        + 0.02 * (occupancy - 70.0);
    logistic(score)
}

/// Probability of leaving without being seen, capped at 0.40
#[must_use]
pub fn lwbs_probability(
    door_to_provider_min: u32,
    occupancy: f64,
    triage: TriageLevel,
    flu_wave: bool,
) -> f64 {
    let score = -4.0 + 0.018 * f64::from(door_to_provider_min) + 0.035 * (occupancy - 70.0)
        - 1.2 * indicator(triage.is_high_acuity())
        - 0.4 * indicator(triage == TriageLevel::Urgent)
        + 0.25 * indicator(flu_wave);
    logistic(score).clamp(0.0, MAX_LWBS_PROB)
}

/// Disposition from the LWBS draw `r` and the admission draw `r2`
///
/// LWBS is decided first and wins over admission.
#[must_use]
pub fn decide_disposition(r: f64, r2: f64, lwbs_prob: f64, admit_prob: f64) -> Disposition {
    if r < lwbs_prob {
        Disposition::LeftWithoutBeingSeen
    } else if r2 < admit_prob {
        Disposition::Admitted
    } else {
        Disposition::Discharged
    }
}
