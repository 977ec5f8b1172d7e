//! Server settings.
//!
//! Layered with `figment`: built-in defaults, then an optional `insights.toml`, then environment
//! variables prefixed with `INSIGHTS_` (e.g. `INSIGHTS_PORT=9000`,
//! `INSIGHTS_ALLOWED_ORIGINS='["https://app.example.com"]'`).

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "insights.toml";
pub const ENV_PREFIX: &str = "INSIGHTS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub project_name: String,
    /// Upper bound on an upload body, in bytes.
    pub max_file_size: usize,
    /// Accepted `Content-Type` essences for uploads.
    pub allowed_file_types: Vec<String>,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Uploads kept in memory; the oldest is evicted once this many are stored.
    pub max_datasets: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            project_name: "AI Data Analyst API".to_string(),
            max_file_size: 10 * 1024 * 1024,
            allowed_file_types: vec!["text/csv".to_string(), "application/csv".to_string()],
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            max_datasets: 100,
        }
    }
}

impl ServerConfig {
    /// Load from [`DEFAULT_CONFIG_FILE`] (if present) and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(DEFAULT_CONFIG_FILE).extract()
    }

    /// Provider stack used by [`ServerConfig::load`], with an explicit TOML path.
    pub fn figment(toml_path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(toml_path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Case-insensitive match of a MIME essence (no parameters) against `allowed_file_types`.
    pub fn accepts_file_type(&self, essence: &str) -> bool {
        self.allowed_file_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(essence))
    }
}
