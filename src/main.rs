mod analysis;
mod config;
mod fetcher;
mod pipeline;
mod storage;
mod web;

#[cfg(test)]
mod testing;

use std::sync::Arc;
use anyhow::{Context, Result};
use axum::http::StatusCode;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comment_pipeline=info,tower_http=info".into()),
        )
        .init();

    info!("Loading configuration...");
    let config = config::AppConfig::load()?;

    // Storage must exist before the first request is served
    let store = Arc::new(storage::SqliteStore::open(&config.storage)?);
    let fetcher = Arc::new(fetcher::HttpFetcher::new(&config.source)?);
    let notifier = Arc::new(pipeline::LogNotifier);

    let pipeline = Arc::new(pipeline::Pipeline::new(fetcher, store, notifier));
    let fetch_error_status = StatusCode::from_u16(config.web.fetch_error_status)
        .context("Invalid web.fetch_error_status")?;
    let app_state = web::state::AppState::new(pipeline, fetch_error_status);

    let router = web::create_router(app_state);
    let addr = format!("{}:{}", config.web.host, config.web.port);
    info!("Starting web server at http://{}", addr);
    info!("Upstream source: {}", config.source.url);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    // The router owned the last handle to the store; the connection is closed now
    info!("Web server stopped, storage closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:#}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
