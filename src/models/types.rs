//! Common domain type definitions
//!
//! This module contains the categorical types of a visit record. Every
//! category has a canonical label, used both in the delimited file and in
//! reports, and parses back from that label.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{EdFlowError, Result};

/// Define a labelled category enum with `ALL`, `label`, `Display` and `FromStr`
macro_rules! define_category {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Label used in the delimited file and in reports
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = EdFlowError;

            fn from_str(s: &str) -> Result<Self> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| EdFlowError::invalid_value(format!("unknown {} '{s}'", $kind)))
            }
        }
    };
}

define_category! {
    /// Presenting chief complaint
    ChiefComplaint, "chief complaint" {
        /// Chest pain
        ChestPain => "Chest Pain",
        /// Abdominal pain
        AbdominalPain => "Abdominal Pain",
        /// Trauma and injuries
        Injury => "Injury",
        /// Fever or respiratory symptoms
        FeverResp => "Fever/Resp",
        /// Headache
        Headache => "Headache",
        /// Anything else
        Other => "Other",
    }
}

define_category! {
    /// Patient age band
    AgeGroup, "age group" {
        /// Paediatric patients
        Child => "0-17",
        /// Young adults
        YoungAdult => "18-34",
        /// Adults
        Adult => "35-49",
        /// Older adults
        OlderAdult => "50-64",
        /// Seniors
        Senior => "65+",
    }
}

define_category! {
    /// How the patient arrived at the department
    ArrivalMode, "arrival mode" {
        /// Brought in by EMS
        Ambulance => "Ambulance",
        /// Self-presented
        WalkIn => "Walk-in",
    }
}

define_category! {
    /// Treatment area the visit was assigned to
    Pod, "pod" {
        PodA => "Pod A",
        PodB => "Pod B",
        PodC => "Pod C",
    }
}

define_category! {
    /// How the visit ended
    Disposition, "disposition" {
        /// Treated and sent home
        Discharged => "Discharged",
        /// Admitted to an inpatient unit
        Admitted => "Admitted",
        /// Left before being evaluated by a provider
        LeftWithoutBeingSeen => "Left Without Being Seen",
    }
}

/// Emergency Severity Index triage level, 1 is most acute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TriageLevel {
    /// ESI 1: immediate life-saving intervention
    Resuscitation = 1,
    /// ESI 2: high risk
    Emergent = 2,
    /// ESI 3: stable, several resources
    Urgent = 3,
    /// ESI 4: one resource
    LessUrgent = 4,
    /// ESI 5: no resources
    NonUrgent = 5,
}

impl TriageLevel {
    /// Every level, most acute first
    pub const ALL: &'static [Self] = &[
        Self::Resuscitation,
        Self::Emergent,
        Self::Urgent,
        Self::LessUrgent,
        Self::NonUrgent,
    ];

    /// Convert a numeric level (1-5)
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            1 => Ok(Self::Resuscitation),
            2 => Ok(Self::Emergent),
            3 => Ok(Self::Urgent),
            4 => Ok(Self::LessUrgent),
            5 => Ok(Self::NonUrgent),
            other => Err(EdFlowError::invalid_value(format!(
                "triage level {other} is outside 1-5"
            ))),
        }
    }

    /// Numeric level (1-5)
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// ESI 1 or 2
    #[must_use]
    pub const fn is_high_acuity(self) -> bool {
        matches!(self, Self::Resuscitation | Self::Emergent)
    }
}

impl TryFrom<u8> for TriageLevel {
    type Error = EdFlowError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_level(value)
    }
}

impl From<TriageLevel> for u8 {
    fn from(level: TriageLevel) -> Self {
        level.level()
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl FromStr for TriageLevel {
    type Err = EdFlowError;

    fn from_str(s: &str) -> Result<Self> {
        let level = s
            .trim()
            .parse::<u8>()
            .map_err(|_| EdFlowError::invalid_value(format!("triage level '{s}' is not a number")))?;
        Self::from_level(level)
    }
}

/// Weekdays in grid order, Monday first
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Saturday or Sunday
#[must_use]
pub const fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}
