//! Value frequency counts for categorical columns.

use std::collections::HashMap;

use crate::types::Column;

/// A distinct value and the number of rows holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Count the non-null values of `column`, most frequent first.
///
/// Ties keep the order in which the values were first seen.
pub fn value_counts(column: &Column) -> Vec<ValueCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for label in column.values().iter().filter_map(|v| v.label()) {
        match index.get(&label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push(ValueCount {
                    value: label,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
