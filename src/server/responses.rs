//! JSON bodies returned by the HTTP handlers.

use serde::Serialize;

use crate::analysis::{ChartDescriptor, ChartKind, DatasetSummary, Insight, InsightKind};

/// `GET /`: service name and crate version.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: &'static str,
}

/// `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Successful `POST /api/upload`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub dataset_id: String,
    pub summary: DatasetSummary,
    pub message: String,
}

impl UploadResponse {
    /// Success body; `dataset_id` is copied out of the summary.
    pub fn new(summary: DatasetSummary) -> Self {
        Self {
            success: true,
            dataset_id: summary.dataset_id.clone(),
            summary,
            message: "File uploaded and processed successfully".to_string(),
        }
    }
}

/// Successful `POST /api/analysis/{dataset_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub dataset_id: String,
    pub charts: Vec<ChartDescriptor>,
    pub insights: Vec<Insight>,
    pub message: String,
}

impl AnalysisResponse {
    pub fn new(dataset_id: String, charts: Vec<ChartDescriptor>, insights: Vec<Insight>) -> Self {
        Self {
            success: true,
            dataset_id,
            charts,
            insights,
            message: "Analysis completed successfully".to_string(),
        }
    }
}

/// Chart types a client may expect for a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ChartCatalog {
    pub dataset_id: String,
    pub available_charts: Vec<ChartKind>,
}

/// Insight types a client may expect for a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct InsightCatalog {
    pub dataset_id: String,
    pub available_insights: Vec<InsightKind>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Failure body with `success: false`; `details` is omitted when `None`.
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}
