//! Continuous metrics the dashboard can emphasise or compare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EdFlowError, Result};
use crate::models::visit::Visit;

/// One of the three continuous visit metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// `door_to_provider_min`
    #[serde(rename = "door_to_provider_min")]
    DoorToProvider,
    /// `length_of_stay_min`
    #[serde(rename = "length_of_stay_min")]
    LengthOfStay,
    /// `bed_occupancy_pct`
    #[serde(rename = "bed_occupancy_pct")]
    BedOccupancy,
}

impl Metric {
    /// Every metric, in selector order
    pub const ALL: [Self; 3] = [Self::DoorToProvider, Self::LengthOfStay, Self::BedOccupancy];

    /// Column name in the visit file
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::DoorToProvider => "door_to_provider_min",
            Self::LengthOfStay => "length_of_stay_min",
            Self::BedOccupancy => "bed_occupancy_pct",
        }
    }

    /// Label of the metric's average
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DoorToProvider => "Avg Door→Provider (min)",
            Self::LengthOfStay => "Avg LOS (min)",
            Self::BedOccupancy => "Avg Occupancy (%)",
        }
    }

    /// Value of the metric for one visit
    #[must_use]
    pub fn value(self, visit: &Visit) -> f64 {
        match self {
            Self::DoorToProvider => f64::from(visit.door_to_provider_min),
            Self::LengthOfStay => f64::from(visit.length_of_stay_min),
            Self::BedOccupancy => visit.bed_occupancy_pct,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = EdFlowError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.column() == trimmed)
            .ok_or_else(|| {
                EdFlowError::invalid_value(format!(
                    "unknown metric '{s}', expected one of door_to_provider_min, \
                     length_of_stay_min, bed_occupancy_pct"
                ))
            })
    }
}

/// Arithmetic mean, NaN for an empty input
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { f64::NAN } else { sum / count as f64 }
}

/// Mean of a metric over visits, NaN for no visits
#[must_use]
pub fn metric_mean<'a>(visits: impl IntoIterator<Item = &'a Visit>, metric: Metric) -> f64 {
    mean(visits.into_iter().map(|v| metric.value(v)))
}
