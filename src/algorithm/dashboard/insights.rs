//! Auto-generated insight callouts
//!
//! Callouts are heuristic threshold comparisons, not statistical tests.
//! Each one checks its own preconditions and is simply left out when they
//! do not hold.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::algorithm::dashboard::metric::{Metric, metric_mean};
use crate::algorithm::dashboard::statistics::format_decimal;
use crate::config::DashboardConfig;
use crate::models::visit::Visit;

/// Thresholds the callouts are computed with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    /// Filtered visits needed before any callout is computed
    pub min_visits: usize,
    /// Occupancy splitting crowded from uncrowded visits
    pub high_occupancy: f64,
    /// Each occupancy group needs more visits than this
    pub min_group_size: usize,
    /// Flu-wave share above which the flu callout is reported
    pub flu_share: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for InsightThresholds {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            min_visits: config.insight_min_visits,
            high_occupancy: config.high_occupancy_threshold,
            min_group_size: config.min_group_size,
            flu_share: config.flu_share_threshold,
        }
    }
}

/// One callout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Mean door-to-provider difference, crowded minus uncrowded
    OccupancyWait { threshold: f64, delta_minutes: f64 },
    /// Mean door-to-provider difference, flu wave minus outside it
    FluWaveWait { delta_minutes: f64 },
    /// Too few filtered visits to compute anything
    InsufficientData { visits: usize, required: usize },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OccupancyWait {
                threshold,
                delta_minutes,
            } => write!(
                f,
                "When occupancy ≥ {threshold}%, average door→provider is {} minutes higher \
                 than when occupancy < {threshold}%.",
                format_decimal(*delta_minutes)
            ),
            Self::FluWaveWait { delta_minutes } => write!(
                f,
                "During the flu-wave window, average door→provider is {} minutes higher \
                 than outside the window.",
                format_decimal(*delta_minutes)
            ),
            Self::InsufficientData { .. } => f.write_str(
                "Not enough filtered data to compute robust insights. Try widening filters.",
            ),
        }
    }
}

/// Compute the callouts of a filtered set
///
/// `has_flu_wave_flag` tells whether the source carried the flag column;
/// without it the flu callout is never reported.
#[must_use]
pub fn compute_insights(
    visits: &[Visit],
    has_flu_wave_flag: bool,
    thresholds: &InsightThresholds,
) -> Vec<Insight> {
    if visits.len() < thresholds.min_visits {
        return vec![Insight::InsufficientData {
            visits: visits.len(),
            required: thresholds.min_visits,
        }];
    }

    let mut insights = Vec::new();

    let (high, low): (Vec<&Visit>, Vec<&Visit>) = visits
        .iter()
        .partition(|v| v.bed_occupancy_pct >= thresholds.high_occupancy);
    if high.len() > thresholds.min_group_size && low.len() > thresholds.min_group_size {
        let delta = metric_mean(high.iter().copied(), Metric::DoorToProvider)
            - metric_mean(low.iter().copied(), Metric::DoorToProvider);
        insights.push(Insight::OccupancyWait {
            threshold: thresholds.high_occupancy,
            delta_minutes: delta,
        });
    } else {
        debug!(
            "Occupancy callout skipped: {} crowded and {} uncrowded visits",
            high.len(),
            low.len()
        );
    }

    if has_flu_wave_flag {
        let (wave, outside): (Vec<&Visit>, Vec<&Visit>) = visits.iter().partition(|v| v.flu_wave);
        let share = wave.len() as f64 / visits.len() as f64;
        if share > thresholds.flu_share && !outside.is_empty() {
            let delta = metric_mean(wave.iter().copied(), Metric::DoorToProvider)
                - metric_mean(outside.iter().copied(), Metric::DoorToProvider);
            insights.push(Insight::FluWaveWait {
                delta_minutes: delta,
            });
        }
    }

    insights
}
