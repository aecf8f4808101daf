//! Configuration for the generator and the dashboard.
//!
//! Both sections can be read from a TOML file; every field has a default so
//! a partial file (or none at all) is valid. Command-line flags override the
//! loaded values.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_to_string;
use crate::error::{EdFlowError, Result};
use crate::utils::date_utils::{DateFormatConfig, parse_date_string};

/// Default location of the visit file
pub const DEFAULT_DATA_PATH: &str = "ed_visits.csv";

/// Configuration for synthetic visit generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of visits to generate
    pub visits: i64,
    /// First day of the arrival window (`YYYY-MM-DD`)
    pub start_date: String,
    /// Length of the arrival window in days
    pub days: i64,
    /// Seed of the pseudo-random source
    pub seed: u64,
    /// Where the CSV is written
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            visits: 5000,
            start_date: "2025-10-01".to_string(),
            days: 90,
            seed: 42,
            output: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl GeneratorConfig {
    /// Check the parameters and resolve them into a generation plan
    ///
    /// Fails with a configuration error on a non-positive visit count or
    /// window length, or an unparseable start date.
    pub fn validate(&self) -> Result<GenerationPlan> {
        GenerationPlan::new(self.visits, &self.start_date, self.days, self.seed)
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Visits: {}", self.visits)?;
        writeln!(f, "  Start Date: {}", self.start_date)?;
        writeln!(f, "  Days: {}", self.days)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(f, "  Output: {}", self.output.display())
    }
}

/// Validated generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Number of visits, at least one
    pub visits: usize,
    /// First day of the arrival window
    pub start_date: NaiveDate,
    /// Window length in days, at least one
    pub days: u32,
    /// Seed of the pseudo-random source
    pub seed: u64,
}

impl GenerationPlan {
    /// Validate raw parameters
    pub fn new(visits: i64, start_date: &str, days: i64, seed: u64) -> Result<Self> {
        if visits <= 0 {
            return Err(EdFlowError::config(format!(
                "number of visits must be positive, got {visits}"
            )));
        }
        if days <= 0 {
            return Err(EdFlowError::config(format!(
                "number of days must be positive, got {days}"
            )));
        }
        let visits = usize::try_from(visits)
            .map_err(|_| EdFlowError::config(format!("number of visits {visits} is too large")))?;
        let days = u32::try_from(days)
            .map_err(|_| EdFlowError::config(format!("number of days {days} is too large")))?;
        let start_date = parse_date_string(start_date, &DateFormatConfig::default())
            .ok_or_else(|| EdFlowError::config(format!("unparseable start date '{start_date}'")))?;
        if start_date.checked_add_days(Days::new(u64::from(days))).is_none() {
            return Err(EdFlowError::config(format!(
                "a window of {days} days from {start_date} is outside the supported calendar"
            )));
        }

        Ok(Self {
            visits,
            start_date,
            days,
            seed,
        })
    }
}

/// Configuration for the dashboard engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Visit file to load
    pub data_path: PathBuf,
    /// Maximum number of points in the crowding scatter sample
    pub sample_cap: usize,
    /// Seed of the scatter sample
    pub sample_seed: u64,
    /// Number of length-of-stay histogram bins
    pub histogram_bins: usize,
    /// Minimum filtered visits before insights are computed
    pub insight_min_visits: usize,
    /// Occupancy (percent) at or above which a visit counts as crowded
    pub high_occupancy_threshold: f64,
    /// Each occupancy group needs more than this many visits
    pub min_group_size: usize,
    /// Flu-wave share above which the flu insight is reported
    pub flu_share_threshold: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            sample_cap: 2500,
            sample_seed: 7,
            histogram_bins: 40,
            insight_min_visits: 50,
            high_occupancy_threshold: 85.0,
            min_group_size: 30,
            flu_share_threshold: 0.05,
        }
    }
}

impl fmt::Display for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard Configuration:")?;
        writeln!(f, "  Data Path: {}", self.data_path.display())?;
        writeln!(f, "  Sample Cap: {} (seed {})", self.sample_cap, self.sample_seed)?;
        writeln!(f, "  Histogram Bins: {}", self.histogram_bins)?;
        writeln!(f, "  Insight Minimum Visits: {}", self.insight_min_visits)?;
        writeln!(f, "  High Occupancy Threshold: {}%", self.high_occupancy_threshold)?;
        writeln!(f, "  Minimum Group Size: {}", self.min_group_size)?;
        writeln!(f, "  Flu Share Threshold: {}", self.flu_share_threshold)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Generator section
    pub generator: GeneratorConfig,
    /// Dashboard section
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "configuration")?;
        Self::from_toml_str(&content)
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.generator, self.dashboard)
    }
}
