//! CSV export to files

mod common;

use common::{step_series, table_of};
use edutrend::analytics::growth::calculate_growth_metrics;
use edutrend::export::{export_metrics_csv, export_raw_csv, RawTransform, UTF8_BOM};
use tempfile::tempdir;

#[test]
fn test_metrics_file_starts_with_bom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.csv");
    let table = table_of(&[
        ("파이썬", step_series(90, 20.0, 22.0, 25.0)),
        ("노코드", step_series(90, 0.5, 5.0, 10.0)),
    ]);
    let metrics = calculate_growth_metrics(&table);

    export_metrics_csv(&path, &metrics, "ko").unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("키워드,"));
    assert!(lines[1].starts_with("파이썬,25.0,25.0,"));
    assert!(lines[2].starts_with("노코드,N/A,"));
}

#[test]
fn test_metrics_columns_have_fixed_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.csv");
    let table = table_of(&[("엑셀", vec![50.0; 30])]);

    export_metrics_csv(&path, &calculate_growth_metrics(&table), "en").unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
    assert_eq!(reader.headers().unwrap().len(), 12);
    for record in reader.records() {
        assert_eq!(record.unwrap().len(), 12);
    }
}

#[test]
fn test_raw_export_smoothed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    let table = table_of(&[("SQL", vec![10.0, 20.0, 30.0, 40.0, 50.0])]);

    export_raw_csv(&path, &table, RawTransform::Smoothed(3)).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "date,SQL");
    assert!(lines[1].ends_with(','));
    assert!(lines[3].ends_with(",20.00"));
    assert!(lines[5].ends_with(",40.00"));
}

#[test]
fn test_raw_export_rejects_bad_window() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    let table = table_of(&[("SQL", vec![10.0; 5])]);

    assert!(export_raw_csv(&path, &table, RawTransform::Smoothed(20)).is_err());
}
