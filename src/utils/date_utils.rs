//! Date and timestamp parsing with multiple format attempts.

use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp format written to the visit file
pub const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for date format handling
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Date formats tried in order
    pub date_formats: Vec<String>,
    /// Timestamp formats tried in order
    pub datetime_formats: Vec<String>,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2025-10-01
                "%Y/%m/%d".to_string(), // 2025/10/01
                "%d.%m.%Y".to_string(), // 01.10.2025
            ],
            datetime_formats: vec![
                DATETIME_OUTPUT_FORMAT.to_string(), // 2025-10-01 14:05:00
                "%Y-%m-%dT%H:%M:%S".to_string(),    // 2025-10-01T14:05:00
                "%Y-%m-%d %H:%M".to_string(),       // 2025-10-01 14:05
                "%Y-%m-%dT%H:%M".to_string(),       // 2025-10-01T14:05
            ],
        }
    }
}

/// Parse a date string, trying every configured format
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Parse a timestamp string, trying every configured format
///
/// A bare date parses as midnight of that day.
#[must_use]
pub fn parse_datetime_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let s = s.trim();
    config
        .datetime_formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| parse_date_string(s, config).and_then(|date| date.and_hms_opt(0, 0, 0)))
}
