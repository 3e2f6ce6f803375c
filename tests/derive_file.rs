use std::fs;

use eco_balance_lib::{AppError, ColumnDeriver};

const PANEL: &str = "\
country,year,total_BiocapPerCap,total_EFConsPerCap,total_BiocapTotGHA,total_EFConsTotGHA,population
Brazil,2018,8.7,2.8,1.8e9,5.9e8,209469333
Brazil,2019,8.6,2.9,1.8e9,6.1e8,211049527
Japan,2019,0.6,4.6,7.6e7,5.8e8,
Qatar,2019,NA,14.3,,4.1e7,2832067
";

#[test]
fn derives_both_columns_and_keeps_existing_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features_full.csv");
    fs::write(&path, PANEL).unwrap();

    let dataset = ColumnDeriver::default().derive(&path, None).unwrap();

    assert_eq!(dataset.shape(), (4, 9));

    let percap = dataset
        .column("eco_balance_percap")
        .unwrap()
        .numeric_values()
        .unwrap();
    let expected = [Some(8.7 - 2.8), Some(8.6 - 2.9), Some(0.6 - 4.6), None];
    assert_eq!(percap, expected);

    let total = dataset
        .column("eco_balance_total")
        .unwrap()
        .numeric_values()
        .unwrap();
    assert_eq!(total[3], None);
    assert_eq!(total[2], Some(7.6e7 - 5.8e8));

    let written = fs::read_to_string(&path).unwrap();
    let original_lines: Vec<&str> = PANEL.lines().collect();
    for (idx, line) in written.lines().enumerate() {
        assert!(
            line.starts_with(original_lines[idx]),
            "row {} lost original values: {}",
            idx,
            line
        );
    }
}

#[test]
fn only_per_capita_pair_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("percap_only.csv");
    fs::write(&path, "total_BiocapPerCap,total_EFConsPerCap\n2.5,1.8\n").unwrap();

    let (dataset, report) = ColumnDeriver::default()
        .derive_with_report(&path, None)
        .unwrap();

    assert!(dataset.has_column("eco_balance_percap"));
    assert!(!dataset.has_column("eco_balance_total"));
    assert_eq!(report.skipped.len(), 1);

    let value = dataset.column("eco_balance_percap").unwrap().cells[0]
        .as_number()
        .unwrap();
    assert!((value - 0.7).abs() < 1e-9);
}

#[test]
fn no_source_columns_writes_input_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    let content = "country,year\nChad,2019\n";
    fs::write(&input, content).unwrap();

    let dataset = ColumnDeriver::default()
        .derive(&input, Some(&output))
        .unwrap();

    assert_eq!(dataset.column_count(), 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), content);
}

#[test]
fn empty_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let err = ColumnDeriver::default().derive(&path, None).unwrap_err();
    assert!(matches!(err, AppError::ParseError(_)));
}
