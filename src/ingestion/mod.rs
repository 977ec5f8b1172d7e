//! Table loading.
//!
//! [`load_table`] turns raw CSV bytes into an immutable [`crate::types::Table`], inferring each
//! column's [`crate::types::ColumnKind`] once. Format details live in [`csv`].

pub mod csv;

pub use self::csv::{is_missing, load_table, load_table_from_reader, NA_MARKERS};
