use ed_flow::algorithm::dashboard::{DashboardReport, Metric, MetricSelection, VisitFilter};
use ed_flow::models::{Pod, VisitTable};
use ed_flow::DashboardConfig;

use crate::utils::{generated_table, kpi_fixture};

#[test]
fn full_report_over_generated_data() {
    let table = generated_table(3000, 42);
    let filter = VisitFilter::select_all(&table);
    let report = DashboardReport::build(
        &table,
        &filter,
        MetricSelection::default(),
        &DashboardConfig::default(),
    );

    assert_eq!(report.kpis.visits, 3000);
    assert_eq!(report.crowding_sample.len(), 2500);
    assert_eq!(report.length_of_stay_histogram.bins.len(), 40);
    assert_eq!(report.heat_grid.rows.len(), 7);
    assert_eq!(report.trend.len(), 90);
    assert_eq!(report.comparison.len(), 6);
    assert!(!report.insights.is_empty());
    assert_eq!(report.metrics.primary, Metric::DoorToProvider);
    assert_eq!(report.metrics.comparison, Metric::LengthOfStay);

    let text = report.render_text();
    assert!(text.contains("Daily Trend: Avg Door→Provider (min)"));
    assert!(text.contains("Comparison by Chief Complaint: Avg length_of_stay_min"));
    assert!(text.contains("Quick Insights"));
}

#[test]
fn empty_filter_reports_no_data() {
    let table = generated_table(500, 42);
    let no_pods: [Pod; 0] = [];
    let filter = VisitFilter::select_all(&table).with_pods(no_pods);
    let report = DashboardReport::build(
        &table,
        &filter,
        MetricSelection::default(),
        &DashboardConfig::default(),
    );

    assert_eq!(report.kpis.visits, 0);
    assert!(report.kpis.avg_door_to_provider.is_nan());
    assert!(report.trend.is_empty());
    assert!(report.comparison.is_empty());
    assert!(report.crowding_sample.is_empty());
    assert!(report.length_of_stay_histogram.is_empty());

    let text = report.render_text();
    assert!(text.contains("Avg LOS (min): n/a"));
    assert!(text.contains("no data"));
    assert!(text.contains("Not enough filtered data"));
}

#[test]
fn json_renders_undefined_values_as_null() {
    let table = generated_table(200, 42);
    let filter = VisitFilter::empty();
    let report = DashboardReport::build(
        &table,
        &filter,
        MetricSelection::default(),
        &DashboardConfig::default(),
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["kpis"]["visits"], 0);
    assert!(json["kpis"]["avg_door_to_provider"].is_null());
    assert!(json["kpis"]["lwbs_rate"].is_null());
    assert_eq!(json["heat_grid"]["rows"].as_array().unwrap().len(), 7);
    assert_eq!(json["insights"][0]["kind"], "insufficient_data");
}

#[test]
fn json_uses_file_labels() {
    let table = VisitTable::from(kpi_fixture());
    let report = DashboardReport::build(
        &table,
        &VisitFilter::select_all(&table),
        MetricSelection {
            primary: Metric::BedOccupancy,
            comparison: Metric::DoorToProvider,
        },
        &DashboardConfig::default(),
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["metrics"]["primary"], "bed_occupancy_pct");
    assert_eq!(json["filter"]["triage_levels"], serde_json::json!([1, 3, 4, 5]));
    assert_eq!(json["comparison"][0]["chief_complaint"], "Other");
    assert_eq!(json["crowding_sample"][2]["disposition"], "Left Without Being Seen");
    assert_eq!(json["kpis"]["avg_door_to_provider"], 25.0);
}

#[test]
fn last_histogram_bin_renders_closed() {
    let table = VisitTable::from(kpi_fixture());
    let report = DashboardReport::build(
        &table,
        &VisitFilter::select_all(&table),
        MetricSelection::default(),
        &DashboardConfig::default(),
    );

    let text = report.render_text();
    let bins: Vec<&str> = text
        .lines()
        .skip_while(|line| !line.starts_with("LOS Distribution"))
        .skip(1)
        .take(report.length_of_stay_histogram.bins.len())
        .collect();
    let (last, rest) = bins.split_last().unwrap();

    assert!(last.trim_start().starts_with('['));
    assert!(last.contains("400.0]"), "{last}");
    assert!(last.ends_with(" 1"));
    assert!(rest.iter().all(|line| line.contains(')') && !line.contains(']')));
}
