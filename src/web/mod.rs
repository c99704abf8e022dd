pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pipeline", post(routes::run_pipeline))
        .route("/health", get(routes::health))
        .with_state(state)
        // Any origin, method and header, credentials included
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}
