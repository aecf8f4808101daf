//! Day-of-week by hour grid of mean door-to-provider time
//!
//! The grid always has seven rows, Monday first, of 24 hourly cells. A slot
//! without visits is `None` rather than zero.

use chrono::Weekday;
use serde::Serialize;

use crate::models::types::{WEEKDAYS, weekday_name};
use crate::models::visit::Visit;

/// Hours per grid row
pub const HOURS_PER_DAY: usize = 24;

/// Aggregate of one (day, hour) slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatCell {
    /// Mean door-to-provider time in minutes
    pub mean_wait: f64,
    /// Visits in the slot
    pub visits: usize,
}

/// One weekday of the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatRow {
    /// Weekday name
    pub day: &'static str,
    /// One cell per hour; `None` where no visit arrived
    pub cells: Vec<Option<HeatCell>>,
}

/// The 7x24 staffing grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatGrid {
    /// Seven rows, Monday first
    pub rows: Vec<HeatRow>,
}

impl HeatGrid {
    /// Build the grid from a filtered set
    #[must_use]
    pub fn from_visits(visits: &[Visit]) -> Self {
        let mut sums = [[(0u64, 0usize); HOURS_PER_DAY]; 7];
        for visit in visits {
            let day = visit.weekday().num_days_from_monday() as usize;
            let hour = visit.hour() as usize;
            let slot = &mut sums[day][hour];
            slot.0 += u64::from(visit.door_to_provider_min);
            slot.1 += 1;
        }

        let rows = WEEKDAYS
            .iter()
            .zip(sums.iter())
            .map(|(&day, hours)| HeatRow {
                day: weekday_name(day),
                cells: hours
                    .iter()
                    .map(|&(total, count)| {
                        (count > 0).then(|| HeatCell {
                            mean_wait: total as f64 / count as f64,
                            visits: count,
                        })
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    /// The cell of a weekday and hour, `None` when no visit fell in it
    #[must_use]
    pub fn get(&self, day: Weekday, hour: u32) -> Option<&HeatCell> {
        self.rows
            .get(day.num_days_from_monday() as usize)?
            .cells
            .get(hour as usize)?
            .as_ref()
    }

    /// Slots with the highest mean wait, at most `n`, highest first
    #[must_use]
    pub fn busiest_slots(&self, n: usize) -> Vec<(Weekday, u32, HeatCell)> {
        let mut slots: Vec<(Weekday, u32, HeatCell)> = WEEKDAYS
            .iter()
            .zip(&self.rows)
            .flat_map(|(&day, row)| {
                row.cells
                    .iter()
                    .enumerate()
                    .filter_map(move |(hour, cell)| cell.map(|c| (day, hour as u32, c)))
            })
            .collect();
        slots.sort_by(|a, b| b.2.mean_wait.total_cmp(&a.2.mean_wait));
        slots.truncate(n);
        slots
    }
}
