use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Unset means the HTTP client's default (no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Status returned alongside the `{"error": ...}` body when the upstream fetch fails
    #[serde(default = "default_fetch_error_status")]
    pub fetch_error_status: u16,
}

fn default_max_items() -> usize {
    5
}

fn default_fetch_error_status() -> u16 {
    200
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("PIPELINE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let config_text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path))?;
        let mut config = Self::parse(&config_text)
            .with_context(|| format!("Failed to parse {}", path))?;

        if let Ok(url) = std::env::var("PIPELINE_SOURCE_URL") {
            config.source.url = url;
        }
        if let Ok(db_path) = std::env::var("PIPELINE_DB_PATH") {
            config.storage.db_path = PathBuf::from(db_path);
        }

        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        axum::http::StatusCode::from_u16(config.web.fetch_error_status)
            .context("web.fetch_error_status is not a valid HTTP status")?;
        Ok(config)
    }
}
