//! Chart and insight generation over a loaded [`Table`].
//!
//! Free functions cover the common case:
//!
//! - [`generate_charts`]: chart descriptors in display order (never fails)
//! - [`generate_insights`]: narrative insights, or a single fallback insight (never fails)
//! - [`summarize`]: dataset metadata for an upload
//!
//! [`Analyzer`] bundles both generators with a configurable [`AnalysisObserver`] and
//! [`ChartOptions`], and runs them side by side.
//!
//! ## Example
//!
//! ```rust
//! use rust_data_insights::analysis::{Analyzer, ChartKind, InsightKind};
//! use rust_data_insights::ingestion::load_table;
//!
//! let table = load_table(b"category,value\nA,1\nB,2\nA,3\nC,4\nB,5\nA,6\n").unwrap();
//! let analysis = Analyzer::new().analyze(&table);
//!
//! let kinds: Vec<ChartKind> = analysis.charts.iter().map(|c| c.kind()).collect();
//! assert_eq!(kinds, vec![ChartKind::Bar, ChartKind::Line, ChartKind::Pie]);
//! assert_eq!(analysis.insights.len(), 1);
//! assert_eq!(analysis.insights[0].kind, InsightKind::Summary);
//! ```

pub mod charts;
pub mod insights;
pub mod observer;
pub mod summary;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::types::Table;

pub use charts::{
    generate_charts, generate_charts_with, CategoryData, ChartDescriptor, ChartKind, ChartOptions,
    ChartPayload, PieData, PieSlice, ScatterData, Series,
};
pub use insights::{
    fallback_insight, generate_insights, generate_insights_with, Insight, InsightKind,
};
pub use observer::{AnalysisEvent, AnalysisObserver, CompositeObserver, TracingObserver};
pub use summary::{summarize, DatasetSummary};

/// Charts and insights computed for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub charts: Vec<ChartDescriptor>,
    pub insights: Vec<Insight>,
}

/// Runs the chart and insight generators with a shared observer.
#[derive(Clone)]
pub struct Analyzer {
    observer: Arc<dyn AnalysisObserver>,
    chart_options: ChartOptions,
}

impl Analyzer {
    /// Analyzer with default chart options that reports through [`TracingObserver`].
    pub fn new() -> Self {
        Self {
            observer: Arc::new(TracingObserver),
            chart_options: ChartOptions::default(),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_observer(mut self, observer: Arc<dyn AnalysisObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the chart options (e.g. to enable distribution charts).
    pub fn with_chart_options(mut self, options: ChartOptions) -> Self {
        self.chart_options = options;
        self
    }

    /// Chart descriptors for `table`; see [`generate_charts_with`].
    pub fn charts(&self, table: &Table) -> Vec<ChartDescriptor> {
        generate_charts_with(table, self.chart_options, self.observer.as_ref())
    }

    /// Insights for `table`; see [`generate_insights_with`].
    pub fn insights(&self, table: &Table) -> Vec<Insight> {
        generate_insights_with(table, self.observer.as_ref())
    }

    /// Compute charts and insights; the two generators share nothing and run in parallel.
    pub fn analyze(&self, table: &Table) -> Analysis {
        let (charts, insights) = rayon::join(|| self.charts(table), || self.insights(table));
        Analysis { charts, insights }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("chart_options", &self.chart_options)
            .finish_non_exhaustive()
    }
}
