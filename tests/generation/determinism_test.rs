use crate::utils::generated_csv;
use ed_flow::generate;
use ed_flow::utils::io::VISIT_COLUMNS;

#[test]
fn same_parameters_give_byte_identical_output() {
    let first = generated_csv(1000, 30, 7);
    let second = generated_csv(1000, 30, 7);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn different_seeds_give_different_tables() {
    assert_ne!(generated_csv(200, 30, 7), generated_csv(200, 30, 8));
}

#[test]
fn header_lists_every_column_in_order() {
    let csv = String::from_utf8(generated_csv(5, 30, 7)).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(header, VISIT_COLUMNS.join(","));
    assert_eq!(csv.lines().count(), 6);
}

#[test]
fn rows_render_flags_and_labels() {
    let csv = String::from_utf8(generated_csv(50, 30, 7)).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    for record in reader.records() {
        let record = record.unwrap();
        assert_eq!(record.len(), VISIT_COLUMNS.len());
        for flag in [9, 10, 15, 17] {
            assert!(matches!(&record[flag], "0" | "1"), "column {flag}: {}", &record[flag]);
        }
        assert!(matches!(
            &record[14],
            "Discharged" | "Admitted" | "Left Without Being Seen"
        ));
        assert_eq!(record[1].len(), "2025-01-01 00:00:00".len());
        assert_eq!(&record[16], &record[1][..10]);
    }
}

#[test]
fn first_arrival_depends_only_on_seed() {
    let small = generate(10, "2025-01-01", 30, 7).unwrap();
    let large = generate(20, "2025-01-01", 30, 7).unwrap();
    assert_eq!(small[0].arrival, large[0].arrival);
    assert_eq!(small.len(), 10);
}
