//! `rust-data-insights` loads a delimited-text upload into a typed in-memory [`types::Table`] and
//! derives chart descriptors, rule-based narrative insights and a dataset summary from it.
//!
//! The primary entrypoints are [`ingestion::load_table`], [`analysis::generate_charts`],
//! [`analysis::generate_insights`] and [`analysis::summarize`]. The chart and insight generators
//! never fail: a rule that cannot be evaluated is reported to an [`analysis::AnalysisObserver`]
//! (by default, through `tracing`) and skipped or replaced by a fallback.
//!
//! ## Loading
//!
//! The first record is the header. Each column gets a [`types::ColumnKind`] from its values:
//! integers, then finite floats make it numeric, `true`/`false` make it boolean, anything else is
//! text. Empty cells and the usual missing-value markers (`NA`, `null`, `NaN`, ...) become
//! [`types::Value::Null`]. Rows with a different number of fields are rejected.
//!
//! ```rust
//! use rust_data_insights::ingestion::load_table;
//! use rust_data_insights::types::ColumnKind;
//!
//! # fn main() -> Result<(), rust_data_insights::InsightError> {
//! let table = load_table(b"city,temp\nOslo,4.5\nLima,\nCairo,31\n")?;
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.column("temp").unwrap().kind(), ColumnKind::Numeric);
//! assert_eq!(table.rows_with_missing(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Charts and insights
//!
//! ```rust
//! use rust_data_insights::analysis::{generate_charts, generate_insights, ChartKind};
//! use rust_data_insights::ingestion::load_table;
//!
//! let table = load_table(b"x,y\n1,2\n2,4\n3,6\n4,8\n").unwrap();
//!
//! let kinds: Vec<ChartKind> = generate_charts(&table).iter().map(|c| c.kind()).collect();
//! assert_eq!(kinds, vec![ChartKind::Line, ChartKind::Scatter]);
//!
//! let insights = generate_insights(&table);
//! assert_eq!(insights[0].title, "Statistical Summary - x");
//! assert_eq!(insights[1].title, "Strong Correlation Found");
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV loading and type inference
//! - [`types`]: table, column and value types
//! - [`processing`]: column classification and statistics
//! - [`analysis`]: chart, insight and summary generation
//! - [`storage`]: uploaded datasets by id
//! - [`error`]: error types
//! - `config`, `server` (feature `server`): settings and the actix-web front

pub mod analysis;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod storage;
pub mod types;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use analysis::{generate_charts, generate_insights, summarize, Analyzer};
pub use error::{ErrorKind, InsightError, InsightResult};
pub use ingestion::load_table;
