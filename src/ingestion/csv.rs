//! CSV table loading.
//!
//! The first record is the header. Every column's [`ColumnKind`] is inferred from its cells:
//!
//! - missing cells (empty, or one of [`NA_MARKERS`]) are ignored for inference and become
//!   [`Value::Null`];
//! - all remaining cells parse as `i64` → numeric, stored as [`Value::Int64`];
//! - all remaining cells parse as a finite `f64` → numeric, stored as [`Value::Float64`];
//! - all remaining cells are `true`/`false` → boolean;
//! - a column with no remaining cells is [`ColumnKind::Unknown`];
//! - anything else is text.
//!
//! Rows must have exactly as many fields as the header; ragged input is rejected.

use std::collections::HashSet;
use std::io::Read;

use tracing::debug;

use crate::error::{InsightError, InsightResult};
use crate::types::{Column, ColumnKind, Table, Value};

/// Cell contents treated as missing, in addition to the empty string.
pub const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a table from raw CSV bytes.
pub fn load_table(bytes: &[u8]) -> InsightResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);
    load_table_from_reader(&mut rdr)
}

/// Load a table from an existing CSV reader.
///
/// The reader should be configured with `has_headers(true)`; a non-flexible reader gives the
/// strict ragged-row behavior of [`load_table`].
pub fn load_table_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> InsightResult<Table> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(InsightError::parse("input has no header row"));
    }
    let names = normalize_headers(&headers);

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for result in rdr.records() {
        let record = result?;
        if record.len() != names.len() {
            // Only reachable with a flexible reader.
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(InsightError::parse(format!(
                "record on line {line} has {} fields, expected {}",
                record.len(),
                names.len()
            )));
        }
        for (column, raw) in cells.iter_mut().zip(record.iter()) {
            column.push(raw.trim().to_owned());
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| infer_column(name, &raw))
        .collect();
    let table = Table::new(columns)?;

    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded csv table"
    );
    Ok(table)
}

/// Returns `true` if a trimmed cell counts as missing.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_MARKERS.contains(&cell)
}

fn normalize_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut names = Vec::with_capacity(headers.len());

    for (idx, raw) in headers.iter().enumerate() {
        let base = match raw.trim() {
            "" => format!("Unnamed: {idx}"),
            name => name.to_owned(),
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

fn infer_column(name: String, raw: &[String]) -> Column {
    if raw.iter().all(|c| is_missing(c)) {
        return Column::new(name, ColumnKind::Unknown, vec![Value::Null; raw.len()]);
    }

    if let Some(parsed) = parse_all(raw, |c| c.parse::<i64>().ok()) {
        return Column::new(name, ColumnKind::Numeric, to_values(parsed, Value::Int64));
    }
    if let Some(parsed) = parse_all(raw, parse_finite_f64) {
        return Column::new(name, ColumnKind::Numeric, to_values(parsed, Value::Float64));
    }
    if let Some(parsed) = parse_all(raw, parse_bool) {
        return Column::new(name, ColumnKind::Boolean, to_values(parsed, Value::Bool));
    }

    let values = raw
        .iter()
        .map(|c| {
            if is_missing(c) {
                Value::Null
            } else {
                Value::Utf8(c.clone())
            }
        })
        .collect();
    Column::new(name, ColumnKind::Text, values)
}

/// Parse every non-missing cell, or return `None` as soon as one fails.
fn parse_all<T>(raw: &[String], parse: impl Fn(&str) -> Option<T>) -> Option<Vec<Option<T>>> {
    raw.iter()
        .map(|c| if is_missing(c) { Some(None) } else { parse(c.as_str()).map(Some) })
        .collect()
}

fn to_values<T>(parsed: Vec<Option<T>>, wrap: impl Fn(T) -> Value) -> Vec<Value> {
    parsed
        .into_iter()
        .map(|v| v.map(&wrap).unwrap_or(Value::Null))
        .collect()
}

fn parse_finite_f64(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_missing, load_table};
    use crate::types::{ColumnKind, Value};

    #[test]
    fn infers_integer_float_text_and_boolean_columns() {
        let input = "id,score,name,active\n1,2.5,Ada,true\n2,3,Grace,False\n";
        let table = load_table(input.as_bytes()).unwrap();

        let kinds: Vec<ColumnKind> = table.columns().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Numeric,
                ColumnKind::Numeric,
                ColumnKind::Text,
                ColumnKind::Boolean
            ]
        );
        assert_eq!(table.columns()[0].values(), &[Value::Int64(1), Value::Int64(2)]);
        // Mixed int/float widens to float.
        assert_eq!(
            table.columns()[1].values(),
            &[Value::Float64(2.5), Value::Float64(3.0)]
        );
        assert_eq!(table.columns()[3].values(), &[Value::Bool(true), Value::Bool(false)]);
    }

    #[test]
    fn na_markers_become_null_and_do_not_affect_kind() {
        let input = "x,y\n1,NA\nnull,b\n3,\n";
        let table = load_table(input.as_bytes()).unwrap();
        let x = table.column("x").unwrap();
        let y = table.column("y").unwrap();

        assert_eq!(x.kind(), ColumnKind::Numeric);
        assert_eq!(x.values(), &[Value::Int64(1), Value::Null, Value::Int64(3)]);
        assert_eq!(y.kind(), ColumnKind::Text);
        assert_eq!(
            y.values(),
            &[Value::Null, Value::Utf8("b".to_string()), Value::Null]
        );
        assert_eq!(table.rows_with_missing(), 3);
    }

    #[test]
    fn all_missing_column_is_unknown() {
        let table = load_table("a,b\n1,\n2,\n".as_bytes()).unwrap();
        assert_eq!(table.column("b").unwrap().kind(), ColumnKind::Unknown);
    }

    #[test]
    fn header_only_input_gives_empty_columns_of_unknown_kind() {
        let table = load_table("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
        assert!(table.columns().iter().all(|c| c.kind() == ColumnKind::Unknown));
    }

    #[test]
    fn non_finite_numbers_are_text() {
        let table = load_table("v\n1\ninf\n".as_bytes()).unwrap();
        assert_eq!(table.column("v").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn blank_and_duplicate_headers_are_renamed() {
        let table = load_table("a,,a,a\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = load_table(b"").unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }

    #[test]
    fn missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("N/A"));
        assert!(!is_missing("0"));
        assert!(!is_missing("none"));
    }
}
