//! In-memory computations over a loaded [`crate::types::Table`].
//!
//! - [`classify`]: split columns into numeric and categorical groups
//! - [`frequency`]: value counts for categorical columns
//! - [`stats`]: mean, sample standard deviation, Pearson correlation, quartiles
//!
//! ## Example
//!
//! ```rust
//! use rust_data_insights::ingestion::load_table;
//! use rust_data_insights::processing::{mean, value_counts, ColumnGroups};
//!
//! let table = load_table(b"category,value\nA,1\nB,2\nA,3\n").unwrap();
//! let groups = ColumnGroups::classify(&table);
//!
//! let counts = value_counts(groups.categorical[0]);
//! assert_eq!(counts[0].value, "A");
//! assert_eq!(counts[0].count, 2);
//!
//! assert_eq!(mean(groups.numeric[0]).unwrap(), 2.0);
//! ```

pub mod classify;
pub mod frequency;
pub mod stats;

pub use classify::ColumnGroups;
pub use frequency::{value_counts, ValueCount};
pub use stats::{
    five_number_summary, mean, pearson, sample_std_dev, CorrelationMatrix, FiveNumberSummary,
    StrongestPair,
};
