use chrono::NaiveDate;
use ed_flow::algorithm::dashboard::{DateRange, FilterCriteria, FilterOptions, VisitFilter};
use ed_flow::models::{ArrivalMode, ChiefComplaint, Pod, TriageLevel, VisitTable};

use crate::utils::{generated_table, visit};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn select_all_keeps_every_visit() {
    let table = generated_table(2000, 42);
    let filter = VisitFilter::select_all(&table);
    assert_eq!(filter.apply(table.visits()).len(), table.len());
}

#[test]
fn filtering_is_idempotent() {
    let table = generated_table(2000, 42);
    let filter = VisitFilter::select_all(&table)
        .with_date_range(DateRange::new(date(2025, 1, 10), date(2025, 2, 20)))
        .with_triage_levels([TriageLevel::Emergent, TriageLevel::Urgent])
        .with_arrival_modes([ArrivalMode::WalkIn])
        .with_pods([Pod::PodA, Pod::PodC]);

    let once = filter.apply(table.visits());
    let twice = filter.apply(&once);
    assert!(!once.is_empty());
    assert_eq!(once, twice);
    assert!(once.iter().all(|v| filter.meets_criteria(v)));
}

#[test]
fn empty_selection_yields_no_rows() {
    let table = generated_table(1000, 42);
    let all = VisitFilter::select_all(&table);

    let no_levels: [TriageLevel; 0] = [];
    let no_complaints: [ChiefComplaint; 0] = [];
    let no_modes: [ArrivalMode; 0] = [];
    let no_pods: [Pod; 0] = [];
    let cases = [
        all.clone().with_triage_levels(no_levels),
        all.clone().with_complaints(no_complaints),
        all.clone().with_arrival_modes(no_modes),
        all.clone().with_pods(no_pods),
    ];
    for filter in &cases {
        assert!(filter.apply(table.visits()).is_empty());
    }
    assert!(VisitFilter::empty().apply(table.visits()).is_empty());
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let table = VisitTable::from(vec![
        visit(1, "2025-01-01 00:00:00"),
        visit(2, "2025-01-02 23:59:00"),
        visit(3, "2025-01-03 00:00:00"),
        visit(4, "2025-01-04 12:00:00"),
    ]);
    let filter = VisitFilter::select_all(&table)
        .with_date_range(DateRange::new(date(2025, 1, 2), date(2025, 1, 3)));
    let ids: Vec<u64> = filter.apply(table.visits()).iter().map(|v| v.visit_id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn inverted_range_matches_nothing() {
    let table = generated_table(300, 1);
    let filter = VisitFilter::select_all(&table)
        .with_date_range(DateRange::new(date(2025, 3, 1), date(2025, 1, 1)));
    assert!(filter.apply(table.visits()).is_empty());
}

#[test]
fn category_filters_restrict_each_dimension() {
    let table = generated_table(2000, 42);
    let filter = VisitFilter::select_all(&table)
        .with_complaints([ChiefComplaint::ChestPain, ChiefComplaint::FeverResp]);
    let filtered = filter.apply(table.visits());
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|v| matches!(
        v.chief_complaint,
        ChiefComplaint::ChestPain | ChiefComplaint::FeverResp
    )));
}

#[test]
fn missing_bounds_fall_back_to_table_dates() {
    let table = VisitTable::from(vec![
        visit(1, "2025-02-03 10:00:00"),
        visit(2, "2025-02-10 10:00:00"),
        visit(3, "2025-02-07 10:00:00"),
    ]);
    assert_eq!(
        DateRange::resolve(&table, None, None),
        DateRange::new(date(2025, 2, 3), date(2025, 2, 10))
    );
    assert_eq!(
        DateRange::resolve(&table, Some(date(2025, 2, 5)), None),
        DateRange::new(date(2025, 2, 5), date(2025, 2, 10))
    );
    assert_eq!(
        DateRange::resolve(&table, None, Some(date(2025, 2, 8))),
        DateRange::new(date(2025, 2, 3), date(2025, 2, 8))
    );
}

#[test]
fn options_are_sorted_and_distinct() {
    let mut rows = vec![
        visit(1, "2025-02-03 10:00:00"),
        visit(2, "2025-02-04 10:00:00"),
        visit(3, "2025-02-05 10:00:00"),
    ];
    rows[0].triage_level = TriageLevel::NonUrgent;
    rows[1].triage_level = TriageLevel::Resuscitation;
    rows[0].chief_complaint = ChiefComplaint::Injury;
    rows[1].chief_complaint = ChiefComplaint::AbdominalPain;
    rows[2].arrival_mode = ArrivalMode::Ambulance;
    rows[2].pod = Pod::PodC;

    let options = FilterOptions::from_table(&VisitTable::from(rows));
    assert_eq!(
        options.triage_levels,
        vec![TriageLevel::Resuscitation, TriageLevel::Urgent, TriageLevel::NonUrgent]
    );
    assert_eq!(
        options.complaints,
        vec![ChiefComplaint::AbdominalPain, ChiefComplaint::Injury, ChiefComplaint::Other]
    );
    assert_eq!(options.arrival_modes, vec![ArrivalMode::Ambulance, ArrivalMode::WalkIn]);
    assert_eq!(options.pods, vec![Pod::PodA, Pod::PodC]);
    assert_eq!(options.date_bounds, Some((date(2025, 2, 3), date(2025, 2, 5))));
}

#[test]
fn empty_table_has_no_options() {
    let table = VisitTable::from(Vec::new());
    let options = FilterOptions::from_table(&table);
    assert!(options.triage_levels.is_empty());
    assert_eq!(options.date_bounds, None);
    assert!(VisitFilter::select_all(&table).apply(table.visits()).is_empty());
}
