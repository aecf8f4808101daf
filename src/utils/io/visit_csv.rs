//! Delimited-text visit files
//!
//! Reading validates the header before any row is parsed, so a file that
//! lacks a required column fails fast. Writing always emits the full header
//! in column order, even for an empty table.

use std::ffi::OsString;
use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::util::{safe_create_file, safe_open_file};
use crate::error::{EdFlowError, Result};
use crate::models::table::VisitTable;
use crate::models::visit::{Visit, VisitRecord};
use crate::utils::date_utils::DateFormatConfig;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Column order of the visit file
pub const VISIT_COLUMNS: [&str; 18] = [
    "visit_id",
    "arrival_datetime",
    "day_of_week",
    "hour",
    "triage_level",
    "chief_complaint",
    "age_group",
    "arrival_mode",
    "pod",
    "labs_ordered",
    "imaging_ordered",
    "bed_occupancy_pct",
    "door_to_provider_min",
    "length_of_stay_min",
    "disposition",
    "flu_wave_flag",
    "arrival_date",
    "is_weekend",
];

/// Columns a visit file must carry; the others are derived or optional
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "visit_id",
    "arrival_datetime",
    "triage_level",
    "chief_complaint",
    "age_group",
    "arrival_mode",
    "pod",
    "labs_ordered",
    "imaging_ordered",
    "bed_occupancy_pct",
    "door_to_provider_min",
    "length_of_stay_min",
    "disposition",
];

/// Write visits as CSV with a header row
pub fn write_visits_to<W: Write>(writer: W, visits: &[Visit]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(VISIT_COLUMNS)?;
    for visit in visits {
        csv_writer.serialize(VisitRecord::from(visit))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write visits to a CSV file, replacing any existing file
///
/// Rows go to a sibling `.tmp` file that is renamed over `path` once every
/// row is flushed, so a failed write leaves any previous file untouched.
pub fn write_visits(path: &Path, visits: &[Visit]) -> Result<()> {
    log_operation_start("Writing visit data to", path);
    let start = Instant::now();

    let temp_path = temp_sibling(path);
    let file = safe_create_file(&temp_path, "visit data")?;
    if let Err(e) = write_visits_to(BufWriter::new(file), visits) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        EdFlowError::file_with_source(path, "Failed to move visit data into place", e)
    })?;

    log_operation_complete("wrote", path, visits.len(), Some(start.elapsed()));
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read visits from CSV, validating the header and every row
pub fn read_visits_from<R: Read>(reader: R, date_config: &DateFormatConfig) -> Result<VisitTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(EdFlowError::schema(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }
    let has_flu_wave_flag = headers.iter().any(|h| h == "flu_wave_flag");

    let mut visits = Vec::new();
    for (idx, result) in csv_reader.deserialize::<VisitRecord>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| EdFlowError::parse(row, e.to_string()))?;
        visits.push(record.into_visit(row, date_config)?);
    }

    Ok(VisitTable::new(visits, has_flu_wave_flag))
}

/// Load a visit file
pub fn read_visits(path: &Path) -> Result<VisitTable> {
    log_operation_start("Loading visit data from", path);
    let start = Instant::now();

    let file: fs::File = safe_open_file(path, "visit data")?;
    let table = read_visits_from(BufReader::new(file), &DateFormatConfig::default())?;
    if !table.has_flu_wave_flag() {
        log_warning("No flu_wave_flag column, flu-wave insight disabled", Some(path));
    }

    log_operation_complete("loaded", path, table.len(), Some(start.elapsed()));
    Ok(table)
}
