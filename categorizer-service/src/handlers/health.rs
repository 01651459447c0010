use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::config::SERVICE_NAME;

/// Liveness only: the service holds no credentials, so the upstream is not probed.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
