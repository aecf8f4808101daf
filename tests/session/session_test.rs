use std::sync::Arc;

use ed_flow::algorithm::dashboard::MetricSelection;
use ed_flow::{DashboardConfig, DashboardSession, DataCache, generate, write_visits};

#[test]
fn cache_returns_the_same_table_until_invalidated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visits.csv");
    write_visits(&path, &generate(300, "2025-01-01", 30, 7).unwrap()).unwrap();

    let mut cache = DataCache::new();
    let first = cache.get_or_load(&path).unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    write_visits(&path, &generate(100, "2025-01-01", 30, 7).unwrap()).unwrap();
    assert_eq!(cache.get_or_load(&path).unwrap().len(), 300);

    assert!(cache.invalidate(&path));
    assert!(!cache.contains(&path));
    let reloaded = cache.get_or_load(&path).unwrap();
    assert_eq!(reloaded.len(), 100);
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(first.len(), 300);
}

#[test]
fn failed_loads_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let mut cache = DataCache::new();
    assert!(cache.get_or_load(&path).is_err());
    assert!(cache.is_empty());
    assert!(!cache.invalidate(&path));
}

#[test]
fn session_reports_over_its_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visits.csv");
    write_visits(&path, &generate(400, "2025-01-01", 30, 7).unwrap()).unwrap();

    let mut session = DashboardSession::new(DashboardConfig {
        data_path: path,
        ..Default::default()
    });
    let options = session.filter_options().unwrap();
    assert_eq!(options.arrival_modes.len(), 2);

    let filter = session.default_filter().unwrap();
    let report = session.report(&filter, MetricSelection::default()).unwrap();
    assert_eq!(report.kpis.visits, 400);
    assert_eq!(report.filter.date_range.start, options.date_bounds.unwrap().0);
}

#[test]
fn sessions_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visits.csv");
    write_visits(&path, &generate(120, "2025-01-01", 30, 7).unwrap()).unwrap();
    let config = DashboardConfig {
        data_path: path,
        ..Default::default()
    };

    let mut first = DashboardSession::new(config.clone());
    let mut second = DashboardSession::new(config);
    let a = first.table().unwrap();
    let b = second.table().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.visits(), b.visits());

    first.reload();
    assert!(!Arc::ptr_eq(&a, &first.table().unwrap()));
}
