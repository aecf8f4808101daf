//! Domain models for emergency-department visits
//!
//! This module contains the categorical types, the visit row and the
//! immutable table the dashboard works on.

pub mod table;
pub mod types;
pub mod visit;

pub use table::VisitTable;
pub use types::{
    AgeGroup, ArrivalMode, ChiefComplaint, Disposition, Pod, TriageLevel, WEEKDAYS, weekday_name,
};
pub use visit::{Visit, VisitRecord};
