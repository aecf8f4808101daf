use ed_flow::algorithm::dashboard::{Insight, InsightThresholds, compute_insights};
use ed_flow::models::{Visit, VisitTable};

use crate::utils::{generated_table, kpi_fixture, visit};

#[test]
fn too_few_visits_give_a_single_notice() {
    let insights = compute_insights(&kpi_fixture(), true, &InsightThresholds::default());
    assert_eq!(
        insights,
        vec![Insight::InsufficientData {
            visits: 4,
            required: 50
        }]
    );
    assert_eq!(
        insights[0].to_string(),
        "Not enough filtered data to compute robust insights. Try widening filters."
    );
}

#[test]
fn generated_data_shows_crowding_and_flu_effects() {
    let table = generated_table(5000, 42);
    let insights = compute_insights(
        table.visits(),
        table.has_flu_wave_flag(),
        &InsightThresholds::default(),
    );

    let occupancy = insights.iter().find_map(|i| match i {
        Insight::OccupancyWait { delta_minutes, .. } => Some(*delta_minutes),
        _ => None,
    });
    let flu = insights.iter().find_map(|i| match i {
        Insight::FluWaveWait { delta_minutes } => Some(*delta_minutes),
        _ => None,
    });
    assert!(occupancy.unwrap() > 0.0);
    assert!(flu.unwrap() > 0.0);
}

#[test]
fn flu_callout_needs_the_flag_column() {
    let table = generated_table(5000, 42);
    let insights = compute_insights(table.visits(), false, &InsightThresholds::default());
    assert!(!insights.iter().any(|i| matches!(i, Insight::FluWaveWait { .. })));
}

#[test]
fn flu_callout_needs_a_meaningful_share() {
    // 30-day window never reaches the flu wave
    let table = VisitTable::from(ed_flow::generate(2000, "2025-01-01", 30, 42).unwrap());
    let insights = compute_insights(table.visits(), true, &InsightThresholds::default());
    assert!(!insights.iter().any(|i| matches!(i, Insight::FluWaveWait { .. })));
}

#[test]
fn occupancy_callout_needs_both_groups() {
    // 60 uncrowded visits, none at or above the threshold
    let rows: Vec<_> = (1..=60)
        .map(|id| visit(id, "2025-01-06 08:00:00"))
        .collect();
    let insights = compute_insights(&rows, true, &InsightThresholds::default());
    assert!(insights.is_empty());
}

#[test]
fn occupancy_delta_is_high_minus_low() {
    let rows: Vec<_> = (1..=80)
        .map(|id| {
            let mut v = visit(id, "2025-01-06 08:00:00");
            if id <= 40 {
                v.bed_occupancy_pct = 90.0;
                v.door_to_provider_min = 45;
            } else {
                v.bed_occupancy_pct = 60.0;
                v.door_to_provider_min = 20;
            }
            v
        })
        .collect();
    let insights = compute_insights(&rows, false, &InsightThresholds::default());
    assert_eq!(
        insights,
        vec![Insight::OccupancyWait {
            threshold: 85.0,
            delta_minutes: 25.0
        }]
    );
    assert_eq!(
        insights[0].to_string(),
        "When occupancy ≥ 85%, average door→provider is 25.0 minutes higher than when occupancy < 85%."
    );
}

#[test]
fn thresholds_come_from_configuration() {
    let config = ed_flow::DashboardConfig {
        insight_min_visits: 3,
        ..Default::default()
    };
    let thresholds = InsightThresholds::from(&config);
    assert_eq!(thresholds.min_visits, 3);
    let insights = compute_insights(&kpi_fixture(), false, &thresholds);
    assert!(!insights.iter().any(|i| matches!(i, Insight::InsufficientData { .. })));
}

/// `crowded` visits at `occupancy` followed by `calm` visits at 60%
fn occupancy_rows(crowded: usize, calm: usize, occupancy: f64) -> Vec<Visit> {
    (0..crowded + calm)
        .map(|idx| {
            let mut v = visit(idx as u64 + 1, "2025-01-06 08:00:00");
            if idx < crowded {
                v.bed_occupancy_pct = occupancy;
                v.door_to_provider_min = 40;
            }
            v
        })
        .collect()
}

/// `total` visits of which the first `wave` fall in the flu wave
fn flu_rows(total: u64, wave: u64) -> Vec<Visit> {
    (1..=total)
        .map(|id| {
            let mut v = visit(id, "2025-01-06 08:00:00");
            v.flu_wave = id <= wave;
            v
        })
        .collect()
}

fn has_occupancy_callout(insights: &[Insight]) -> bool {
    insights
        .iter()
        .any(|i| matches!(i, Insight::OccupancyWait { .. }))
}

fn has_flu_callout(insights: &[Insight]) -> bool {
    insights.iter().any(|i| matches!(i, Insight::FluWaveWait { .. }))
}

#[test]
fn minimum_visit_count_is_inclusive() {
    let thresholds = InsightThresholds::default();

    let rows = occupancy_rows(0, 49, 0.0);
    assert_eq!(
        compute_insights(&rows, false, &thresholds),
        vec![Insight::InsufficientData {
            visits: 49,
            required: 50
        }]
    );

    let rows = occupancy_rows(0, 50, 0.0);
    assert!(compute_insights(&rows, false, &thresholds).is_empty());
}

#[test]
fn occupancy_at_the_threshold_counts_as_crowded() {
    let rows = occupancy_rows(31, 31, 85.0);
    let insights = compute_insights(&rows, false, &InsightThresholds::default());
    assert_eq!(
        insights,
        vec![Insight::OccupancyWait {
            threshold: 85.0,
            delta_minutes: 20.0
        }]
    );

    let rows = occupancy_rows(31, 31, 84.9);
    assert!(!has_occupancy_callout(&compute_insights(
        &rows,
        false,
        &InsightThresholds::default()
    )));
}

#[test]
fn occupancy_groups_must_exceed_the_minimum_size() {
    let thresholds = InsightThresholds::default();
    for (crowded, calm) in [(30, 31), (31, 30), (30, 30)] {
        let rows = occupancy_rows(crowded, calm, 90.0);
        assert!(
            !has_occupancy_callout(&compute_insights(&rows, false, &thresholds)),
            "{crowded} crowded, {calm} calm"
        );
    }
    let rows = occupancy_rows(31, 31, 90.0);
    assert!(has_occupancy_callout(&compute_insights(&rows, false, &thresholds)));
}

#[test]
fn flu_share_must_exceed_the_threshold() {
    let thresholds = InsightThresholds::default();

    let at_threshold = compute_insights(&flu_rows(100, 5), true, &thresholds);
    assert!(at_threshold.is_empty());

    let above = compute_insights(&flu_rows(100, 6), true, &thresholds);
    assert_eq!(above, vec![Insight::FluWaveWait { delta_minutes: 0.0 }]);
    assert!(has_flu_callout(&above));
}
