use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use fraudscan_application::AppState;

use crate::handlers::{ops_handlers, result_handlers, upload_handlers};
use crate::session::session_layer;

pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX);
    let sessions = session_layer(&state.config);

    Router::new()
        .route("/", get(upload_handlers::upload_form))
        .route("/upload", post(upload_handlers::upload))
        .route("/results_button", get(upload_handlers::results_button))
        .route("/fetch_results", get(result_handlers::fetch_results))
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/metrics", get(ops_handlers::metrics_prometheus))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(sessions)
        .with_state(state)
}
