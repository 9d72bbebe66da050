use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;
use app_error::AppError;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router())
        .fallback(not_found_handler)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn not_found_handler() -> AppError {
    AppError::NotFound
}
