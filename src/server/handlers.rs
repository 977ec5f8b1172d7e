use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use futures_util::TryStreamExt;
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::{summarize, ChartKind, InsightKind};
use crate::config::ServerConfig;
use crate::error::{ErrorKind, InsightError, InsightResult};
use crate::ingestion::load_table;
use crate::storage::StoredDataset;

use super::responses::{
    AnalysisResponse, ChartCatalog, ErrorResponse, HealthStatus, InsightCatalog, ServiceInfo,
    UploadResponse,
};
use super::AppState;

const DEFAULT_FILE_NAME: &str = "upload.csv";
const FILE_PART: &str = "file";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// An [`InsightError`] on its way to becoming an HTTP response.
///
/// `failure` is the `error` label used when the cause maps to a 5xx.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct ApiError {
    source: InsightError,
    failure: &'static str,
}

impl ApiError {
    pub fn upload(source: InsightError) -> Self {
        Self {
            source,
            failure: "Internal server error",
        }
    }

    pub fn analysis(source: InsightError) -> Self {
        Self {
            source,
            failure: "Analysis failed",
        }
    }

    fn label(&self) -> &'static str {
        match self.source.kind() {
            ErrorKind::Parse => "Invalid CSV file",
            ErrorKind::Validation => "Invalid upload",
            ErrorKind::NotFound => "Dataset not found",
            ErrorKind::Internal => self.failure,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.source.kind() {
            ErrorKind::Parse | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(
            self.label(),
            Some(self.source.to_string()),
        ))
    }
}

#[get("/")]
pub(super) async fn root(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        message: state.config.project_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[get("/health")]
pub(super) async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus { status: "healthy" })
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadQuery {
    file_name: Option<String>,
}

/// Bytes read from a request, plus the file name a multipart part carried.
struct Upload {
    body: web::Bytes,
    file_name: Option<String>,
}

/// Accepts either a raw CSV body or `multipart/form-data` with a `file` part.
///
/// The name in the summary is the part's filename, else `?file_name=`, else `upload.csv`.
#[post("/upload")]
pub(super) async fn upload_csv(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let essence = req
        .mime_type()
        .ok()
        .flatten()
        .map(|m| m.essence_str().to_owned());
    let upload = match essence.as_deref() {
        Some(e) if e.eq_ignore_ascii_case(MULTIPART_FORM_DATA) => {
            read_multipart(&state.config, &req, payload).await?
        }
        Some(e) if state.config.accepts_file_type(e) => Upload {
            body: read_raw(payload, state.config.max_file_size).await?,
            file_name: None,
        },
        _ => return Err(not_csv()),
    };

    let file_name = upload
        .file_name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| query.into_inner().file_name.filter(|n| !n.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    let logged_name = file_name.clone();
    let body = upload.body;

    let (table, summary) = web::block(move || -> InsightResult<_> {
        let table = load_table(&body)?;
        let summary = summarize(&table, file_name, body.len() as u64);
        Ok((table, summary))
    })
    .await
    .map_err(|e| {
        ApiError::upload(InsightError::Internal {
            message: e.to_string(),
        })
    })?
    .map_err(|e| {
        warn!(file_name = %logged_name, error = %e, "rejected upload");
        ApiError::upload(e)
    })?;
    info!(
        dataset_id = %summary.dataset_id,
        file_name = %summary.file_name,
        rows = summary.rows,
        columns = summary.columns,
        "dataset uploaded"
    );

    state
        .store
        .insert(StoredDataset::new(summary.clone(), table))
        .map_err(ApiError::upload)?;

    Ok(HttpResponse::Ok().json(UploadResponse::new(summary)))
}

async fn read_raw(payload: web::Payload, limit: usize) -> Result<web::Bytes, ApiError> {
    match payload.to_bytes_limited(limit).await {
        Ok(read) => read.map_err(|e| {
            ApiError::upload(InsightError::validation(format!(
                "failed to read upload body: {e}"
            )))
        }),
        Err(_) => Err(too_large(limit)),
    }
}

/// Reads the first `file` part; other parts are drained and ignored.
async fn read_multipart(
    config: &ServerConfig,
    req: &HttpRequest,
    payload: web::Payload,
) -> Result<Upload, ApiError> {
    let limit = config.max_file_size;
    let mut multipart = Multipart::new(req.headers(), payload);

    while let Some(mut field) = multipart.try_next().await.map_err(malformed)? {
        if field.name() != Some(FILE_PART) {
            while field.try_next().await.map_err(malformed)?.is_some() {}
            continue;
        }

        let accepted = field
            .content_type()
            .is_some_and(|m| config.accepts_file_type(m.essence_str()));
        if !accepted {
            return Err(not_csv());
        }
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let mut body = web::BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if body.len() + chunk.len() > limit {
                return Err(too_large(limit));
            }
            body.extend_from_slice(&chunk);
        }
        return Ok(Upload {
            body: body.freeze(),
            file_name,
        });
    }

    Err(ApiError::upload(InsightError::validation(format!(
        "multipart upload has no '{FILE_PART}' part"
    ))))
}

fn not_csv() -> ApiError {
    ApiError::upload(InsightError::validation("Only CSV files are allowed"))
}

fn too_large(limit: usize) -> ApiError {
    ApiError::upload(InsightError::validation(format!(
        "File size exceeds maximum allowed size of {limit} bytes"
    )))
}

fn malformed(error: MultipartError) -> ApiError {
    ApiError::upload(InsightError::validation(format!(
        "malformed multipart upload: {error}"
    )))
}

#[post("/analysis/{dataset_id}")]
pub(super) async fn analyze_dataset(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let dataset_id = path.into_inner();
    let dataset = state.store.get(&dataset_id).map_err(ApiError::analysis)?;

    let analyzer = state.analyzer.clone();
    let table = dataset.table.clone();
    let analysis = web::block(move || analyzer.analyze(&table))
        .await
        .map_err(|e| {
            ApiError::analysis(InsightError::Internal {
                message: e.to_string(),
            })
        })?;

    info!(
        dataset_id = %dataset_id,
        charts = analysis.charts.len(),
        insights = analysis.insights.len(),
        "dataset analyzed"
    );

    Ok(HttpResponse::Ok().json(AnalysisResponse::new(
        dataset_id,
        analysis.charts,
        analysis.insights,
    )))
}

#[get("/analysis/charts/{dataset_id}")]
pub(super) async fn chart_catalog(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ChartCatalog {
        dataset_id: path.into_inner(),
        available_charts: ChartKind::ALL.to_vec(),
    })
}

#[get("/analysis/insights/{dataset_id}")]
pub(super) async fn insight_catalog(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(InsightCatalog {
        dataset_id: path.into_inner(),
        available_insights: InsightKind::ALL.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    use super::ApiError;
    use crate::error::InsightError;

    #[test]
    fn status_follows_error_kind() {
        let cases = [
            (ApiError::upload(InsightError::parse("no header")), StatusCode::BAD_REQUEST),
            (
                ApiError::upload(InsightError::validation("too big")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::analysis(InsightError::NotFound {
                    dataset_id: "ds_x".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::analysis(InsightError::Internal {
                    message: "boom".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn internal_label_depends_on_endpoint() {
        let internal = || InsightError::Internal {
            message: "boom".into(),
        };
        assert_eq!(ApiError::upload(internal()).label(), "Internal server error");
        assert_eq!(ApiError::analysis(internal()).label(), "Analysis failed");
    }
}
