use anyhow::Context;
use tracing_subscriber::EnvFilter;

use rust_data_insights::config::ServerConfig;
use rust_data_insights::server::{start_server, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::load().context("failed to load server configuration")?;
    let (host, port) = config.bind_address();
    let addr = format!("{host}:{port}");

    let server = start_server(AppState::new(config))
        .with_context(|| format!("failed to bind {addr}"))?;
    server.await.context("server terminated with an error")?;
    Ok(())
}
