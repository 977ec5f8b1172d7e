use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::Table;

/// Metadata recorded for an uploaded table. The `dataset_id` is the handle used by later
/// analysis requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub dataset_id: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub file_name: String,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
}

/// Describe `table` under a freshly generated `ds_xxxxxxxxxxxx` identifier.
pub fn summarize(table: &Table, file_name: impl Into<String>, file_size: u64) -> DatasetSummary {
    DatasetSummary {
        dataset_id: new_dataset_id(),
        rows: table.row_count(),
        columns: table.column_count(),
        column_names: table.column_names(),
        file_name: file_name.into(),
        file_size,
        created_at: Utc::now(),
    }
}

fn new_dataset_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("ds_{}", &hex[..12])
}
