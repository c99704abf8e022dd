use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::pipeline::{PipelineOutcome, PipelineRequest};
use super::state::AppState;

/// `POST /pipeline`. Body validation is the `Json` extractor's rejection.
pub async fn run_pipeline(
    State(state): State<AppState>,
    Json(request): Json<PipelineRequest>,
) -> Response {
    let outcome = state.pipeline.run(&request).await;

    let status = match outcome {
        PipelineOutcome::Completed(_) => StatusCode::OK,
        PipelineOutcome::FetchFailed(_) => state.fetch_error_status,
    };

    (status, Json(outcome)).into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored_items: Option<u64>,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.pipeline.store().count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                stored_items: Some(count),
            }),
        ),
        Err(e) => {
            error!("Health check failed: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    stored_items: None,
                }),
            )
        }
    }
}
