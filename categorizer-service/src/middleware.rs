use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::services::Metrics;

/// Path label for requests answered by the static file fallback.
const STATIC_PATH_LABEL: &str = "static";

/// Record request count and latency, labelled by route template rather than
/// raw URI so static asset paths do not explode label cardinality.
pub async fn track_metrics(
    State(metrics): State<Arc<Metrics>>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| STATIC_PATH_LABEL.to_string());

    let response = next.run(req).await;

    metrics.observe_http(&method, &path, response.status().as_u16(), start.elapsed());

    response
}
