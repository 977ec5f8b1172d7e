use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::InsightError;

use super::charts::ChartKind;

/// Events emitted while charts and insights are generated.
#[derive(Debug, Clone, Copy)]
pub enum AnalysisEvent<'a> {
    /// A chart rule failed and was skipped; the other rules still ran.
    ChartRuleFailed {
        rule: ChartKind,
        error: &'a InsightError,
    },
    ChartsGenerated { count: usize },
    InsightsGenerated { count: usize },
    /// An insight rule failed; partial results were replaced by the fallback insight.
    InsightsFellBack { error: &'a InsightError },
}

/// Diagnostic sink for analysis events.
///
/// Implementors can record metrics, logs, or trigger alerts. Generators never fail, so this is
/// the only place rule failures become visible.
pub trait AnalysisObserver: Send + Sync {
    fn on_event(&self, event: &AnalysisEvent<'_>);
}

/// Forwards events to `tracing`.
///
/// Internal errors log at `error`, data edge cases (undefined statistics, empty tables) at `warn`,
/// completion events at `debug`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        match event {
            AnalysisEvent::ChartRuleFailed { rule, error } => {
                if is_data_edge_case(error) {
                    warn!(rule = %rule, error = %error, "chart rule skipped");
                } else {
                    error!(rule = %rule, error = %error, "chart rule failed");
                }
            }
            AnalysisEvent::ChartsGenerated { count } => debug!(count, "charts generated"),
            AnalysisEvent::InsightsGenerated { count } => debug!(count, "insights generated"),
            AnalysisEvent::InsightsFellBack { error } => {
                if is_data_edge_case(error) {
                    warn!(error = %error, "insight rules failed, using fallback insight");
                } else {
                    error!(error = %error, "insight rules failed, using fallback insight");
                }
            }
        }
    }
}

fn is_data_edge_case(error: &InsightError) -> bool {
    !matches!(error, InsightError::Internal { .. })
}

/// Fans out events to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn AnalysisObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn AnalysisObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl AnalysisObserver for CompositeObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}
