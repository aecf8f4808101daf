use chrono::{NaiveDate, Weekday};
use ed_flow::algorithm::dashboard::{
    DashboardStatistics, HeatGrid, Metric, compare_by_complaint, crowding_sample, daily_trend,
    length_of_stay_histogram, metric_series,
};
use ed_flow::models::{ChiefComplaint, WEEKDAYS, weekday_name};

use crate::utils::{assert_close, generated_table, kpi_fixture, visit};

#[test]
fn kpis_match_hand_computed_values() {
    let kpis = DashboardStatistics::calculate_kpis(&kpi_fixture());
    assert_eq!(kpis.visits, 4);
    assert_close(kpis.avg_door_to_provider, 25.0);
    assert_close(kpis.avg_length_of_stay, 250.0);
    assert_close(kpis.avg_occupancy, 65.0);
    assert_close(kpis.lwbs_rate, 25.0);
    assert_close(kpis.admission_rate, 25.0);
    assert_close(kpis.metric(Metric::LengthOfStay), 250.0);
}

#[test]
fn kpi_cards_render_one_decimal() {
    let summary = DashboardStatistics::generate_summary(&DashboardStatistics::calculate_kpis(
        &kpi_fixture(),
    ));
    assert!(summary.contains("Visits: 4"));
    assert!(summary.contains("Avg Door→Provider (min): 25.0"));
    assert!(summary.contains("Avg LOS (min): 250.0"));
    assert!(summary.contains("LWBS Rate: 25.0%"));
    assert!(summary.contains("Admission Rate: 25.0%"));
}

#[test]
fn daily_trend_is_sorted_and_complete() {
    let mut rows = vec![
        visit(1, "2025-01-03 08:00:00"),
        visit(2, "2025-01-01 09:00:00"),
        visit(3, "2025-01-03 17:00:00"),
    ];
    rows[0].door_to_provider_min = 10;
    rows[2].door_to_provider_min = 30;
    rows[1].door_to_provider_min = 50;

    let trend = daily_trend(&rows);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(trend[0].visits, 1);
    assert_close(trend[0].avg_door_to_provider, 50.0);
    assert_eq!(trend[1].visits, 2);
    assert_close(trend[1].avg_door_to_provider, 20.0);

    let series = metric_series(&trend, Metric::DoorToProvider);
    assert_eq!(series.len(), 2);
    assert_close(series[1].1, 20.0);
}

#[test]
fn trend_counts_cover_every_visit() {
    let table = generated_table(3000, 42);
    let trend = daily_trend(table.visits());
    assert_eq!(trend.iter().map(|p| p.visits).sum::<usize>(), 3000);
    assert!(trend.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn comparison_is_descending_by_value() {
    let mut rows = vec![
        visit(1, "2025-01-01 08:00:00"),
        visit(2, "2025-01-01 09:00:00"),
        visit(3, "2025-01-01 10:00:00"),
    ];
    rows[0].chief_complaint = ChiefComplaint::Headache;
    rows[0].length_of_stay_min = 90;
    rows[1].chief_complaint = ChiefComplaint::ChestPain;
    rows[1].length_of_stay_min = 400;
    rows[2].chief_complaint = ChiefComplaint::ChestPain;
    rows[2].length_of_stay_min = 200;

    let bars = compare_by_complaint(&rows, Metric::LengthOfStay);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].chief_complaint, ChiefComplaint::ChestPain);
    assert_close(bars[0].value, 300.0);
    assert_eq!(bars[0].visits, 2);
    assert_eq!(bars[1].chief_complaint, ChiefComplaint::Headache);

    let table = generated_table(3000, 42);
    let bars = compare_by_complaint(table.visits(), Metric::DoorToProvider);
    assert!(bars.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test]
fn heat_grid_always_has_seven_ordered_rows() {
    let mut rows = vec![
        visit(1, "2025-01-06 08:10:00"), // Monday
        visit(2, "2025-01-06 08:50:00"),
        visit(3, "2025-01-12 23:00:00"), // Sunday
    ];
    rows[0].door_to_provider_min = 10;
    rows[1].door_to_provider_min = 30;

    let grid = HeatGrid::from_visits(&rows);
    assert_eq!(grid.rows.len(), 7);
    for (row, day) in grid.rows.iter().zip(WEEKDAYS) {
        assert_eq!(row.day, weekday_name(day));
        assert_eq!(row.cells.len(), 24);
    }
    assert_eq!(grid.rows[0].day, "Monday");
    assert_eq!(grid.rows[6].day, "Sunday");

    let monday = grid.get(Weekday::Mon, 8).unwrap();
    assert_eq!(monday.visits, 2);
    assert_close(monday.mean_wait, 20.0);
    assert!(grid.get(Weekday::Mon, 9).is_none());
    assert!(grid.rows[1].cells.iter().all(Option::is_none));
    assert_eq!(grid.get(Weekday::Sun, 23).unwrap().visits, 1);
}

#[test]
fn heat_grid_of_no_visits_is_all_undefined() {
    let grid = HeatGrid::from_visits(&[]);
    assert_eq!(grid.rows.len(), 7);
    assert!(grid.rows.iter().all(|r| r.cells.iter().all(Option::is_none)));
    assert!(grid.busiest_slots(5).is_empty());
}

#[test]
fn histogram_counts_every_filtered_visit() {
    let table = generated_table(3000, 42);
    let hist = length_of_stay_histogram(table.visits(), 40);
    assert_eq!(hist.bins.len(), 40);
    assert_eq!(hist.total(), 3000);

    let min = table.visits().iter().map(|v| v.length_of_stay_min).min().unwrap();
    let max = table.visits().iter().map(|v| v.length_of_stay_min).max().unwrap();
    assert_close(hist.bins[0].lower, f64::from(min));
    assert_close(hist.bins[39].upper, f64::from(max));
}

#[test]
fn crowding_sample_is_capped_and_reproducible() {
    let table = generated_table(3000, 42);
    let first = crowding_sample(table.visits(), 2500, 7);
    let second = crowding_sample(table.visits(), 2500, 7);
    assert_eq!(first.len(), 2500);
    assert_eq!(first, second);
    assert_ne!(first, crowding_sample(table.visits(), 2500, 8));

    let small = crowding_sample(&table.visits()[..100], 2500, 7);
    assert_eq!(small.len(), 100);
}

#[test]
fn empty_set_aggregates_are_empty() {
    assert!(daily_trend(&[]).is_empty());
    assert!(compare_by_complaint(&[], Metric::BedOccupancy).is_empty());
    assert!(crowding_sample(&[], 2500, 7).is_empty());
    assert!(length_of_stay_histogram(&[], 40).is_empty());
    assert!(DashboardStatistics::calculate_kpis(&[]).avg_occupancy.is_nan());
}
