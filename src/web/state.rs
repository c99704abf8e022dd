use axum::http::StatusCode;
use std::sync::Arc;

use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Status paired with the `{"error": ...}` body on upstream failure
    pub fetch_error_status: StatusCode,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, fetch_error_status: StatusCode) -> Self {
        Self {
            pipeline,
            fetch_error_status,
        }
    }
}
