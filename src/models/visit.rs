//! Visit model
//!
//! `Visit` is the typed domain row used by the generator and the dashboard.
//! `VisitRecord` is the flat row of the delimited file; converting a record
//! into a visit validates categories, bounds and timestamps.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EdFlowError, Result};
use crate::models::types::{
    AgeGroup, ArrivalMode, ChiefComplaint, Disposition, Pod, TriageLevel, is_weekend,
    weekday_name,
};
use crate::utils::date_utils::{DATETIME_OUTPUT_FORMAT, DateFormatConfig, parse_datetime_string};

/// Bounds of `bed_occupancy_pct`
pub const OCCUPANCY_BOUNDS: (f64, f64) = (35.0, 98.0);
/// Bounds of `door_to_provider_min`
pub const DOOR_TO_PROVIDER_BOUNDS: (u32, u32) = (2, 240);
/// Bounds of `length_of_stay_min`
pub const LENGTH_OF_STAY_BOUNDS: (u32, u32) = (25, 900);

/// One emergency-department visit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visit {
    /// Sequential identifier, 1..N
    pub visit_id: u64,
    /// Arrival timestamp, whole minutes
    pub arrival: NaiveDateTime,
    /// ESI triage level
    pub triage_level: TriageLevel,
    /// Presenting complaint
    pub chief_complaint: ChiefComplaint,
    /// Age band
    pub age_group: AgeGroup,
    /// Ambulance or walk-in
    pub arrival_mode: ArrivalMode,
    /// Treatment pod
    pub pod: Pod,
    /// Whether labs were ordered
    pub labs_ordered: bool,
    /// Whether imaging was ordered
    pub imaging_ordered: bool,
    /// Bed occupancy at arrival, percent
    pub bed_occupancy_pct: f64,
    /// Minutes from arrival to first provider contact
    pub door_to_provider_min: u32,
    /// Minutes from arrival to departure or admission
    pub length_of_stay_min: u32,
    /// Outcome of the visit
    pub disposition: Disposition,
    /// Arrival fell inside the flu-wave window
    pub flu_wave: bool,
}

impl Visit {
    /// Calendar date of arrival
    #[must_use]
    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival.date()
    }

    /// Weekday of arrival
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.arrival.weekday()
    }

    /// Hour of arrival (0-23)
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.arrival.hour()
    }

    /// Arrival on a Saturday or Sunday
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        is_weekend(self.weekday())
    }

    /// Visit ended as "Left Without Being Seen"
    #[must_use]
    pub fn left_without_being_seen(&self) -> bool {
        self.disposition == Disposition::LeftWithoutBeingSeen
    }

    /// Visit ended in admission
    #[must_use]
    pub fn admitted(&self) -> bool {
        self.disposition == Disposition::Admitted
    }
}

/// Flat row of the delimited visit file, in column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub visit_id: u64,
    pub arrival_datetime: String,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub hour: Option<u32>,
    pub triage_level: u8,
    pub chief_complaint: String,
    pub age_group: String,
    pub arrival_mode: String,
    pub pod: String,
    pub labs_ordered: u8,
    pub imaging_ordered: u8,
    pub bed_occupancy_pct: f64,
    pub door_to_provider_min: u32,
    pub length_of_stay_min: u32,
    pub disposition: String,
    #[serde(default)]
    pub flu_wave_flag: Option<u8>,
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub is_weekend: Option<u8>,
}

impl From<&Visit> for VisitRecord {
    fn from(visit: &Visit) -> Self {
        Self {
            visit_id: visit.visit_id,
            arrival_datetime: visit.arrival.format(DATETIME_OUTPUT_FORMAT).to_string(),
            day_of_week: Some(weekday_name(visit.weekday()).to_string()),
            hour: Some(visit.hour()),
            triage_level: visit.triage_level.level(),
            chief_complaint: visit.chief_complaint.label().to_string(),
            age_group: visit.age_group.label().to_string(),
            arrival_mode: visit.arrival_mode.label().to_string(),
            pod: visit.pod.label().to_string(),
            labs_ordered: u8::from(visit.labs_ordered),
            imaging_ordered: u8::from(visit.imaging_ordered),
            bed_occupancy_pct: visit.bed_occupancy_pct,
            door_to_provider_min: visit.door_to_provider_min,
            length_of_stay_min: visit.length_of_stay_min,
            disposition: visit.disposition.label().to_string(),
            flu_wave_flag: Some(u8::from(visit.flu_wave)),
            arrival_date: Some(visit.arrival_date().to_string()),
            is_weekend: Some(u8::from(visit.is_weekend())),
        }
    }
}

impl VisitRecord {
    /// Validate the record and convert it into a visit
    ///
    /// Derived columns (`day_of_week`, `hour`, `arrival_date`, `is_weekend`)
    /// are recomputed from `arrival_datetime`; a missing `flu_wave_flag`
    /// reads as `false`.
    pub fn into_visit(self, row: usize, date_config: &DateFormatConfig) -> Result<Visit> {
        let at_row = |e: EdFlowError| EdFlowError::parse(row, e.to_string());

        let arrival = parse_datetime_string(&self.arrival_datetime, date_config).ok_or_else(|| {
            EdFlowError::parse(
                row,
                format!("unparseable arrival_datetime '{}'", self.arrival_datetime),
            )
        })?;

        let (occ_min, occ_max) = OCCUPANCY_BOUNDS;
        if !(occ_min..=occ_max).contains(&self.bed_occupancy_pct) {
            return Err(EdFlowError::parse(
                row,
                format!(
                    "bed_occupancy_pct {} outside [{occ_min}, {occ_max}]",
                    self.bed_occupancy_pct
                ),
            ));
        }
        check_bounds(row, "door_to_provider_min", self.door_to_provider_min, DOOR_TO_PROVIDER_BOUNDS)?;
        check_bounds(row, "length_of_stay_min", self.length_of_stay_min, LENGTH_OF_STAY_BOUNDS)?;

        Ok(Visit {
            visit_id: self.visit_id,
            arrival,
            triage_level: TriageLevel::from_level(self.triage_level).map_err(at_row)?,
            chief_complaint: self.chief_complaint.parse().map_err(at_row)?,
            age_group: self.age_group.parse().map_err(at_row)?,
            arrival_mode: self.arrival_mode.parse().map_err(at_row)?,
            pod: self.pod.parse().map_err(at_row)?,
            labs_ordered: flag(row, "labs_ordered", self.labs_ordered)?,
            imaging_ordered: flag(row, "imaging_ordered", self.imaging_ordered)?,
            bed_occupancy_pct: self.bed_occupancy_pct,
            door_to_provider_min: self.door_to_provider_min,
            length_of_stay_min: self.length_of_stay_min,
            disposition: self.disposition.parse().map_err(at_row)?,
            flu_wave: match self.flu_wave_flag {
                Some(value) => flag(row, "flu_wave_flag", value)?,
                None => false,
            },
        })
    }
}

fn check_bounds(row: usize, column: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EdFlowError::parse(
            row,
            format!("{column} {value} outside [{min}, {max}]"),
        ))
    }
}

fn flag(row: usize, column: &str, value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(EdFlowError::parse(
            row,
            format!("{column} must be 0 or 1, found {other}"),
        )),
    }
}
