//! Chart descriptor generation.
//!
//! [`generate_charts`] applies a fixed list of rules, in display order:
//!
//! 1. **bar**: value counts of the first categorical column (top [`MAX_BAR_CATEGORIES`])
//! 2. **line**: raw values of the first numeric column against the row index (needs > 1 row)
//! 3. **pie**: value counts of the first categorical column, if it has
//!    [`PIE_MIN_CATEGORIES`]..=[`PIE_MAX_CATEGORIES`] distinct values
//! 4. **scatter**: first two numeric columns paired row by row
//!
//! With [`ChartOptions::distribution_bins`] set, a histogram and a box plot of the first numeric
//! column follow. A failing rule is reported to the observer and skipped.

use std::fmt;

use serde::Serialize;

use crate::error::{InsightError, InsightResult};
use crate::processing::{five_number_summary, value_counts, ColumnGroups, ValueCount};
use crate::types::{Column, Table, Value};

use super::observer::{AnalysisEvent, AnalysisObserver, TracingObserver};

pub const MAX_BAR_CATEGORIES: usize = 10;
pub const PIE_MIN_CATEGORIES: usize = 2;
pub const PIE_MAX_CATEGORIES: usize = 8;

const BAR_COLOR: &str = "#3b82f6";
const LINE_COLOR: &str = "#10b981";
const SCATTER_COLOR: &str = "#8b5cf6";
const HISTOGRAM_COLOR: &str = "#f59e0b";
const BOX_COLOR: &str = "#ef4444";

/// Chart type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Histogram,
    Box,
}

impl ChartKind {
    /// Every kind, in rule order.
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Box,
    ];

    /// Wire name, as used in the `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
            ChartKind::Box => "box",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub name: String,
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for charts drawn against a category axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryData<C, T> {
    pub categories: Vec<C>,
    pub series: Vec<Series<T>>,
}

/// One pie wedge: a category and its count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub value: u64,
    pub name: String,
}

/// Payload for pie charts; slices are in descending count order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieData {
    pub series: Vec<Series<PieSlice>>,
}

/// Payload for scatter charts, with axis names serialized as `xAxisName`/`yAxisName`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterData {
    pub x_axis_name: String,
    pub y_axis_name: String,
    /// One `[x, y]` point per row; nulls are kept so the pair count equals the row count.
    pub series: Vec<Series<[Value; 2]>>,
}

/// Chart payload, tagged so a renderer can dispatch on `type` alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ChartPayload {
    Bar(CategoryData<String, u64>),
    Line(CategoryData<usize, Value>),
    Pie(PieData),
    Scatter(ScatterData),
    /// Bin labels and counts.
    Histogram(CategoryData<String, u64>),
    /// `[min, q1, median, q3, max]` per category.
    Box(CategoryData<String, [f64; 5]>),
}

/// A chart ready to be rendered by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub title: String,
    #[serde(flatten)]
    pub payload: ChartPayload,
}

impl ChartDescriptor {
    /// Kind implied by the payload variant.
    pub fn kind(&self) -> ChartKind {
        match self.payload {
            ChartPayload::Bar(_) => ChartKind::Bar,
            ChartPayload::Line(_) => ChartKind::Line,
            ChartPayload::Pie(_) => ChartKind::Pie,
            ChartPayload::Scatter(_) => ChartKind::Scatter,
            ChartPayload::Histogram(_) => ChartKind::Histogram,
            ChartPayload::Box(_) => ChartKind::Box,
        }
    }
}

/// Knobs for [`generate_charts_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartOptions {
    /// When set, append a histogram with this many bins and a box plot of the first numeric
    /// column. Zero bins makes the histogram rule fail (and be skipped).
    pub distribution_bins: Option<usize>,
}

/// Generate charts with default options, reporting skipped rules through `tracing`.
pub fn generate_charts(table: &Table) -> Vec<ChartDescriptor> {
    generate_charts_with(table, ChartOptions::default(), &TracingObserver)
}

/// Generate charts, reporting skipped rules to `observer`. Never fails.
pub fn generate_charts_with(
    table: &Table,
    options: ChartOptions,
    observer: &dyn AnalysisObserver,
) -> Vec<ChartDescriptor> {
    let groups = ColumnGroups::classify(table);
    let counted = groups
        .first_categorical()
        .map(|column| (column, value_counts(column)));

    let mut outcomes = vec![
        (ChartKind::Bar, bar_chart(counted.as_ref())),
        (ChartKind::Line, line_chart(table, &groups)),
        (ChartKind::Pie, pie_chart(counted.as_ref())),
        (ChartKind::Scatter, scatter_chart(&groups)),
    ];
    if let Some(bins) = options.distribution_bins {
        outcomes.push((ChartKind::Histogram, histogram_chart(&groups, bins)));
        outcomes.push((ChartKind::Box, box_chart(&groups)));
    }

    let mut charts = Vec::with_capacity(outcomes.len());
    for (rule, outcome) in outcomes {
        match outcome {
            Ok(Some(chart)) => charts.push(chart),
            Ok(None) => {}
            Err(error) => observer.on_event(&AnalysisEvent::ChartRuleFailed {
                rule,
                error: &error,
            }),
        }
    }

    observer.on_event(&AnalysisEvent::ChartsGenerated {
        count: charts.len(),
    });
    charts
}

type RuleOutcome = InsightResult<Option<ChartDescriptor>>;

fn bar_chart(counted: Option<&(&Column, Vec<ValueCount>)>) -> RuleOutcome {
    let Some((column, counts)) = counted else {
        return Ok(None);
    };
    let top = &counts[..counts.len().min(MAX_BAR_CATEGORIES)];

    Ok(Some(ChartDescriptor {
        title: format!("Distribution of {}", column.name()),
        payload: ChartPayload::Bar(CategoryData {
            categories: top.iter().map(|c| c.value.clone()).collect(),
            series: vec![Series {
                name: column.name().to_owned(),
                data: top.iter().map(|c| c.count).collect(),
                color: Some(BAR_COLOR.to_owned()),
            }],
        }),
    }))
}

fn line_chart(table: &Table, groups: &ColumnGroups<'_>) -> RuleOutcome {
    let Some(column) = groups.first_numeric() else {
        return Ok(None);
    };
    if table.row_count() <= 1 {
        return Ok(None);
    }

    Ok(Some(ChartDescriptor {
        title: format!("Trend of {}", column.name()),
        payload: ChartPayload::Line(CategoryData {
            categories: (0..column.len()).collect(),
            series: vec![Series {
                name: column.name().to_owned(),
                data: column.values().to_vec(),
                color: Some(LINE_COLOR.to_owned()),
            }],
        }),
    }))
}

fn pie_chart(counted: Option<&(&Column, Vec<ValueCount>)>) -> RuleOutcome {
    let Some((column, counts)) = counted else {
        return Ok(None);
    };
    if !(PIE_MIN_CATEGORIES..=PIE_MAX_CATEGORIES).contains(&counts.len()) {
        return Ok(None);
    }

    Ok(Some(ChartDescriptor {
        title: format!("Distribution of {}", column.name()),
        payload: ChartPayload::Pie(PieData {
            series: vec![Series {
                name: column.name().to_owned(),
                data: counts
                    .iter()
                    .map(|c| PieSlice {
                        value: c.count,
                        name: c.value.clone(),
                    })
                    .collect(),
                color: None,
            }],
        }),
    }))
}

fn scatter_chart(groups: &ColumnGroups<'_>) -> RuleOutcome {
    let (x, y) = match groups.numeric.as_slice() {
        [x, y, ..] => (*x, *y),
        _ => return Ok(None),
    };

    Ok(Some(ChartDescriptor {
        title: format!("{} vs {}", x.name(), y.name()),
        payload: ChartPayload::Scatter(ScatterData {
            x_axis_name: x.name().to_owned(),
            y_axis_name: y.name().to_owned(),
            series: vec![Series {
                name: "Data Points".to_owned(),
                data: x
                    .values()
                    .iter()
                    .zip(y.values())
                    .map(|(a, b)| [a.clone(), b.clone()])
                    .collect(),
                color: Some(SCATTER_COLOR.to_owned()),
            }],
        }),
    }))
}

fn histogram_chart(groups: &ColumnGroups<'_>, bins: usize) -> RuleOutcome {
    let Some(column) = groups.first_numeric() else {
        return Ok(None);
    };
    if bins == 0 {
        return Err(InsightError::statistics(
            column.name(),
            "histogram needs at least one bin",
        ));
    }
    let summary = five_number_summary(column)?;
    let (min, max) = (summary.min, summary.max);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0_u64; bins];
    for v in column.numbers() {
        let idx = if width > 0.0 {
            (((v - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    let categories = (0..bins)
        .map(|i| {
            let lo = min + width * i as f64;
            let hi = if i + 1 == bins { max } else { lo + width };
            format!("{lo:.2}-{hi:.2}")
        })
        .collect();

    Ok(Some(ChartDescriptor {
        title: format!("Histogram of {}", column.name()),
        payload: ChartPayload::Histogram(CategoryData {
            categories,
            series: vec![Series {
                name: column.name().to_owned(),
                data: counts,
                color: Some(HISTOGRAM_COLOR.to_owned()),
            }],
        }),
    }))
}

fn box_chart(groups: &ColumnGroups<'_>) -> RuleOutcome {
    let Some(column) = groups.first_numeric() else {
        return Ok(None);
    };
    let s = five_number_summary(column)?;

    Ok(Some(ChartDescriptor {
        title: format!("Box plot of {}", column.name()),
        payload: ChartPayload::Box(CategoryData {
            categories: vec![column.name().to_owned()],
            series: vec![Series {
                name: column.name().to_owned(),
                data: vec![[s.min, s.q1, s.median, s.q3, s.max]],
                color: Some(BOX_COLOR.to_owned()),
            }],
        }),
    }))
}
