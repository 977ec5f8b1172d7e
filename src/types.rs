//! Core data model types.
//!
//! Loading produces an immutable, column-major [`Table`]: an ordered list of named [`Column`]s,
//! each carrying a [`ColumnKind`] decided once at load time and a vector of typed [`Value`]s.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

use crate::error::{InsightError, InsightResult};

/// Logical kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-missing cell is an integer or a finite float.
    Numeric,
    /// Free text / categorical labels.
    Text,
    /// Every non-missing cell is `true` or `false`.
    Boolean,
    /// No non-missing cells at all.
    Unknown,
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell; `None` for nulls and non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Label used when the cell is counted as a category.
    pub fn label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int64(v) => Some(v.to_string()),
            Value::Float64(v) => Some(v.to_string()),
            Value::Bool(v) => Some(v.to_string()),
            Value::Utf8(s) => Some(s.clone()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

/// A named column of cells that all share one [`ColumnKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    /// Wrap already-typed cells. The caller is responsible for `values` matching `kind`.
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Header name, after blank/duplicate renaming.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind decided at load time.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Cells in row order, nulls included.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of cells (equal to the table's row count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-null numeric values in row order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(Value::as_f64)
    }
}

/// In-memory table.
///
/// Invariants (checked by [`Table::new`]): all columns have the same length and column names are
/// unique. The table is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns, validating the shape invariants.
    pub fn new(columns: Vec<Column>) -> InsightResult<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.len() != row_count {
                return Err(InsightError::SchemaMismatch {
                    message: format!(
                        "column '{}' has {} values, expected {}",
                        column.name(),
                        column.len(),
                        row_count
                    ),
                });
            }
            if !seen.insert(column.name()) {
                return Err(InsightError::SchemaMismatch {
                    message: format!("duplicate column name '{}'", column.name()),
                });
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Owned column names in header order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_owned()).collect()
    }

    /// Number of rows with at least one missing cell in any column.
    pub fn rows_with_missing(&self) -> usize {
        (0..self.row_count)
            .filter(|&row| self.columns.iter().any(|c| c.values()[row].is_null()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, ColumnKind, Table, Value};
    use crate::error::InsightError;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::new(
                "id",
                ColumnKind::Numeric,
                vec![Value::Int64(1), Value::Int64(2), Value::Null],
            ),
            Column::new(
                "name",
                ColumnKind::Text,
                vec![
                    Value::Utf8("a".to_string()),
                    Value::Null,
                    Value::Utf8("c".to_string()),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn counts_rows_with_any_missing_cell() {
        let table = sample_table();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows_with_missing(), 2);
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", ColumnKind::Numeric, vec![Value::Int64(1)]),
            Column::new("b", ColumnKind::Numeric, vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, InsightError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("column 'b' has 0 values, expected 1"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::new("a", ColumnKind::Unknown, vec![Value::Null]),
            Column::new("a", ColumnKind::Unknown, vec![Value::Null]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'a'"));
    }

    #[test]
    fn values_serialize_as_plain_json() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Int64(3),
            Value::Float64(1.5),
            Value::Bool(true),
            Value::Utf8("x".to_string()),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,3,1.5,true,"x"]"#);
    }
}
