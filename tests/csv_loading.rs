use rust_data_insights::ingestion::{load_table, load_table_from_reader};
use rust_data_insights::types::{ColumnKind, Value};
use rust_data_insights::{ErrorKind, InsightError};

fn sales() -> Vec<u8> {
    std::fs::read("tests/fixtures/sales.csv").unwrap()
}

#[test]
fn load_fixture_infers_column_kinds() {
    let table = load_table(&sales()).unwrap();

    assert_eq!(table.row_count(), 12);
    assert_eq!(table.column_count(), 4);
    assert_eq!(
        table.column_names(),
        vec!["region", "units", "revenue", "returned"]
    );

    let kinds: Vec<ColumnKind> = table.columns().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ColumnKind::Text,
            ColumnKind::Numeric,
            ColumnKind::Numeric,
            ColumnKind::Boolean
        ]
    );
}

#[test]
fn missing_markers_become_null() {
    let table = load_table(&sales()).unwrap();

    let units = table.column("units").unwrap();
    assert_eq!(units.values()[8], Value::Null);
    assert_eq!(units.values()[0], Value::Int64(12));

    let revenue = table.column("revenue").unwrap();
    assert_eq!(revenue.values()[3], Value::Null);
    assert_eq!(revenue.values()[0], Value::Float64(240.5));

    assert_eq!(table.rows_with_missing(), 2);
}

#[test]
fn row_and_column_counts_follow_the_input() {
    let input = "a,b,c\n1,x,true\n2,y,false\n3,z,true\n";
    let table = load_table(input.as_bytes()).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 3);
}

#[test]
fn header_only_input_is_an_empty_table() {
    let table = load_table(b"a,b\n").unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 2);
    assert!(table.columns().iter().all(|c| c.kind() == ColumnKind::Unknown));
}

#[test]
fn empty_input_has_no_header() {
    let err = load_table(b"").unwrap_err();
    assert!(matches!(err, InsightError::Parse { .. }));
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn ragged_rows_are_rejected() {
    let err = load_table(b"a,b\n1,2\n3\n").unwrap_err();
    assert!(matches!(err, InsightError::Csv(_)));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn flexible_reader_still_rejects_ragged_rows() {
    let input = "a,b\n1,2\n3,4,5\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let err = load_table_from_reader(&mut rdr).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("parse error"));
    assert!(msg.contains("has 3 fields, expected 2"));
}

#[test]
fn blank_and_duplicate_headers_are_renamed() {
    let table = load_table(b"id,,id,name,id\n1,2,3,x,4\n").unwrap();
    assert_eq!(
        table.column_names(),
        vec!["id", "Unnamed: 1", "id.1", "name", "id.2"]
    );
}

#[test]
fn mixed_integers_and_floats_are_numeric() {
    let table = load_table(b"v\n1\n2.5\n-3\n").unwrap();
    let v = table.column("v").unwrap();
    assert_eq!(v.kind(), ColumnKind::Numeric);
    assert_eq!(
        v.values(),
        &[Value::Float64(1.0), Value::Float64(2.5), Value::Float64(-3.0)]
    );
}

#[test]
fn a_single_non_numeric_cell_makes_the_column_text() {
    let table = load_table(b"v\n1\n2\nthree\n").unwrap();
    let v = table.column("v").unwrap();
    assert_eq!(v.kind(), ColumnKind::Text);
    assert_eq!(v.values()[0], Value::Utf8("1".to_string()));
}

#[test]
fn quoted_fields_keep_embedded_delimiters() {
    let table = load_table(b"name,city\n\"Doe, Jane\",Oslo\n").unwrap();
    assert_eq!(
        table.column("name").unwrap().values()[0],
        Value::Utf8("Doe, Jane".to_string())
    );
}
