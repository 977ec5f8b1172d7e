//! Column classification.

use crate::types::{Column, ColumnKind, Table};

/// Borrowed partition of a [`Table`]'s columns into numeric and categorical groups.
///
/// Both groups keep the table's column order. Boolean and unknown columns belong to neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroups<'a> {
    /// Columns of kind [`ColumnKind::Numeric`].
    pub numeric: Vec<&'a Column>,
    /// Columns of kind [`ColumnKind::Text`].
    pub categorical: Vec<&'a Column>,
}

impl<'a> ColumnGroups<'a> {
    pub fn classify(table: &'a Table) -> Self {
        let of_kind = |kind: ColumnKind| -> Vec<&'a Column> {
            table.columns().iter().filter(|c| c.kind() == kind).collect()
        };
        Self {
            numeric: of_kind(ColumnKind::Numeric),
            categorical: of_kind(ColumnKind::Text),
        }
    }

    pub fn first_numeric(&self) -> Option<&'a Column> {
        self.numeric.first().copied()
    }

    pub fn first_categorical(&self) -> Option<&'a Column> {
        self.categorical.first().copied()
    }
}
