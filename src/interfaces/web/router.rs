use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use super::AppState;
use super::handlers::tasks;

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(tasks::service_info))
        .route("/tasks/new", post(tasks::create_task))
        .route("/tasks/status", get(tasks::task_status))
        .route("/tasks/getresult", get(tasks::task_result))
        .layer(build_cors())
        .with_state(state)
}
