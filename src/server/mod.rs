//! actix-web front for uploads and analysis.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | service name and version |
//! | GET | `/health` | liveness |
//! | POST | `/api/upload` | raw CSV body with optional `?file_name=`, or a multipart `file` part |
//! | POST | `/api/analysis/{dataset_id}` | charts and insights for a stored upload |
//! | GET | `/api/analysis/charts/{dataset_id}` | chart types |
//! | GET | `/api/analysis/insights/{dataset_id}` | insight types |
//!
//! Failures are returned as [`responses::ErrorResponse`] bodies: 400 for rejected or malformed
//! uploads, 404 for unknown datasets, 500 otherwise.

mod handlers;
pub mod responses;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::analysis::Analyzer;
use crate::config::ServerConfig;
use crate::storage::{DatasetStore, InMemoryDatasetStore};

pub use handlers::ApiError;

/// Shared by every worker.
pub struct AppState {
    pub config: ServerConfig,
    pub store: Arc<dyn DatasetStore>,
    pub analyzer: Analyzer,
}

impl AppState {
    /// State with an empty in-memory store bounded by `max_datasets`, and the default analyzer.
    pub fn new(config: ServerConfig) -> Self {
        let store = InMemoryDatasetStore::with_capacity(config.max_datasets);
        Self {
            config,
            store: Arc::new(store),
            analyzer: Analyzer::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn DatasetStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }
}

/// Register every route. The caller provides `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::root)
        .service(handlers::health)
        .service(
            web::scope("/api")
                .service(handlers::upload_csv)
                .service(handlers::analyze_dataset)
                .service(handlers::chart_catalog)
                .service(handlers::insight_catalog),
        );
}

/// CORS policy admitting `allowed_origins`; `"*"` admits any origin.
pub fn cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials();
    for origin in &config.allowed_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }
    cors
}

/// Bind to `host:port` from the state's config and start serving.
pub fn start_server(state: AppState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let (host, port) = {
        let (host, port) = state.config.bind_address();
        (host.to_owned(), port)
    };

    let server = HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .wrap(cors(&state.config))
                .app_data(state.clone())
                .configure(configure)
        }
    })
    .bind((host.as_str(), port))?
    .run();

    info!(%host, port, project = %state.config.project_name, "listening");
    Ok(server)
}
