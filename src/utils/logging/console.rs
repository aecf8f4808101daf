//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use crate::models::visit::{Visit, VisitRecord};

/// Print the shape of a generated or loaded table
pub fn print_table_summary(visits: &[Visit], columns: usize, elapsed: std::time::Duration) {
    println!("Produced {} visits x {} columns in {:?}", visits.len(), columns, elapsed);
}

/// Print the first rows of a table as column/value pairs
pub fn print_sample_rows(visits: &[Visit], num_rows: usize) {
    println!("First {num_rows} rows:");
    for (row_idx, visit) in visits.iter().take(num_rows).enumerate() {
        let record = VisitRecord::from(visit);
        println!(
            "Row {row_idx}: [visit_id: {}, arrival_datetime: {}, triage_level: {}, \
             chief_complaint: {}, arrival_mode: {}, pod: {}, bed_occupancy_pct: {}, \
             door_to_provider_min: {}, length_of_stay_min: {}, disposition: {}, flu_wave_flag: {}]",
            record.visit_id,
            record.arrival_datetime,
            record.triage_level,
            record.chief_complaint,
            record.arrival_mode,
            record.pod,
            record.bed_occupancy_pct,
            record.door_to_provider_min,
            record.length_of_stay_min,
            record.disposition,
            record.flu_wave_flag.unwrap_or(0),
        );
    }
}
