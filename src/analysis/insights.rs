//! Rule-based narrative insights.
//!
//! Rules, evaluated in order:
//!
//! 1. data quality ([`InsightKind::Anomaly`], 0.9): rows with missing values, if a numeric column
//!    exists
//! 2. statistical summary ([`InsightKind::Summary`], 0.8): mean and sample standard deviation of
//!    the first numeric column, if it holds at least two values
//! 3. correlation ([`InsightKind::Correlation`], confidence = |r|): strongest Pearson pair among
//!    numeric columns, if |r| > [`CORRELATION_THRESHOLD`]
//! 4. overview ([`InsightKind::Trend`], 0.7): table shape, if it has more than
//!    [`OVERVIEW_MIN_ROWS`] rows
//!
//! An empty table, or a failing rule, drops every partial result and [`fallback_insight`] is
//! returned alone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{InsightError, InsightResult};
use crate::processing::{mean, sample_std_dev, ColumnGroups, CorrelationMatrix};
use crate::types::Table;

use super::observer::{AnalysisEvent, AnalysisObserver, TracingObserver};

pub const CORRELATION_THRESHOLD: f64 = 0.5;
pub const OVERVIEW_MIN_ROWS: usize = 10;
pub const GOOD_SAMPLE_ROWS: usize = 100;

const DATA_QUALITY_CONFIDENCE: f64 = 0.9;
const SUMMARY_CONFIDENCE: f64 = 0.8;
const OVERVIEW_CONFIDENCE: f64 = 0.7;
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Category of an [`Insight`], serialized as its `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Trend,
    Anomaly,
    Correlation,
    Summary,
    /// Reserved for model-backed forecasts; no rule emits it.
    Prediction,
}

impl InsightKind {
    /// Every kind a client may receive.
    pub const ALL: [InsightKind; 5] = [
        InsightKind::Trend,
        InsightKind::Anomaly,
        InsightKind::Correlation,
        InsightKind::Summary,
        InsightKind::Prediction,
    ];

    /// Wire name, as used in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Trend => "trend",
            InsightKind::Anomaly => "anomaly",
            InsightKind::Correlation => "correlation",
            InsightKind::Summary => "summary",
            InsightKind::Prediction => "prediction",
        }
    }
}

/// A single finding about a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// In `[0, 1]` when present.
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Insight {
    /// Build an insight with a fresh `insight_xxxxxxxx` id; confidence is clamped to `[0, 1]`.
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: Option<f64>,
    ) -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("insight_{}", &hex[..8]),
            title: title.into(),
            description: description.into(),
            kind,
            confidence: confidence.map(|c| c.clamp(0.0, 1.0)),
            created_at: Utc::now(),
        }
    }
}

/// The single insight returned when the rules cannot be evaluated.
pub fn fallback_insight() -> Insight {
    Insight::new(
        InsightKind::Summary,
        "Analysis Complete",
        "Dataset has been successfully processed. Basic analysis completed.",
        Some(FALLBACK_CONFIDENCE),
    )
}

/// Generate insights, reporting a fallback through `tracing`.
pub fn generate_insights(table: &Table) -> Vec<Insight> {
    generate_insights_with(table, &TracingObserver)
}

/// Generate insights, reporting a fallback to `observer`. Never fails.
pub fn generate_insights_with(table: &Table, observer: &dyn AnalysisObserver) -> Vec<Insight> {
    match evaluate_rules(table) {
        Ok(insights) => {
            observer.on_event(&AnalysisEvent::InsightsGenerated {
                count: insights.len(),
            });
            insights
        }
        Err(error) => {
            observer.on_event(&AnalysisEvent::InsightsFellBack { error: &error });
            vec![fallback_insight()]
        }
    }
}

fn evaluate_rules(table: &Table) -> InsightResult<Vec<Insight>> {
    if table.row_count() == 0 {
        return Err(InsightError::EmptyTable);
    }
    let groups = ColumnGroups::classify(table);

    let mut insights = Vec::new();
    insights.extend(data_quality(table, &groups));
    insights.extend(statistical_summary(&groups)?);
    insights.extend(correlation(&groups));
    insights.extend(overview(table));
    Ok(insights)
}

fn data_quality(table: &Table, groups: &ColumnGroups<'_>) -> Option<Insight> {
    if groups.numeric.is_empty() {
        return None;
    }
    let missing = table.rows_with_missing();
    if missing == 0 {
        return None;
    }
    let pct = missing as f64 / table.row_count() as f64 * 100.0;

    Some(Insight::new(
        InsightKind::Anomaly,
        "Data Quality Issue",
        format!(
            "Found {missing} rows ({pct:.1}%) with missing values. Consider data cleaning before analysis."
        ),
        Some(DATA_QUALITY_CONFIDENCE),
    ))
}

fn statistical_summary(groups: &ColumnGroups<'_>) -> InsightResult<Option<Insight>> {
    let Some(column) = groups.first_numeric() else {
        return Ok(None);
    };
    if column.numbers().count() < 2 {
        return Ok(None);
    }
    let mean_val = mean(column)?;
    let std_val = sample_std_dev(column)?;
    let variability = if std_val > mean_val { "high" } else { "low" };

    Ok(Some(Insight::new(
        InsightKind::Summary,
        format!("Statistical Summary - {}", column.name()),
        format!(
            "Mean: {mean_val:.2}, Standard Deviation: {std_val:.2}. The data shows {variability} variability."
        ),
        Some(SUMMARY_CONFIDENCE),
    )))
}

fn correlation(groups: &ColumnGroups<'_>) -> Option<Insight> {
    if groups.numeric.len() < 2 {
        return None;
    }
    let pair = CorrelationMatrix::compute(&groups.numeric).strongest_pair()?;
    if pair.strength <= CORRELATION_THRESHOLD {
        return None;
    }

    Some(Insight::new(
        InsightKind::Correlation,
        "Strong Correlation Found",
        format!(
            "Strong correlation ({:.2}) between {} and {}. This suggests a potential relationship worth investigating.",
            pair.strength, pair.first, pair.second
        ),
        Some(pair.strength),
    ))
}

fn overview(table: &Table) -> Option<Insight> {
    let rows = table.row_count();
    if rows <= OVERVIEW_MIN_ROWS {
        return None;
    }
    let remark = if rows > GOOD_SAMPLE_ROWS {
        "Good sample size for analysis"
    } else {
        "Consider collecting more data for robust analysis"
    };

    Some(Insight::new(
        InsightKind::Trend,
        "Dataset Overview",
        format!(
            "Dataset contains {rows} rows and {} columns. {remark}.",
            table.column_count()
        ),
        Some(OVERVIEW_CONFIDENCE),
    ))
}

#[cfg(test)]
mod tests {
    use super::{fallback_insight, Insight, InsightKind};

    #[test]
    fn ids_are_prefixed_and_short() {
        let insight = fallback_insight();
        assert!(insight.id.starts_with("insight_"));
        assert_eq!(insight.id.len(), "insight_".len() + 8);
        assert_ne!(insight.id, fallback_insight().id);
    }

    #[test]
    fn confidence_is_clamped() {
        let insight = Insight::new(InsightKind::Correlation, "t", "d", Some(1.0000001));
        assert_eq!(insight.confidence, Some(1.0));
    }

    #[test]
    fn serializes_kind_as_type() {
        let json = serde_json::to_value(fallback_insight()).unwrap();
        assert_eq!(json["type"], "summary");
        assert_eq!(json["confidence"], 0.5);
        assert_eq!(json["title"], "Analysis Complete");
    }
}
