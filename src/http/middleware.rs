use crate::metrics::WebMetrics;
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;

/// Record status, endpoint and latency for every request.
///
/// Uses the matched route template when routing succeeded so that
/// `/phonebook/:id` is tracked as one endpoint, and the raw path otherwise.
pub async fn track_web_metrics(
    State(metrics): State<Arc<dyn WebMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    metrics.record_request(&path, &method, response.status().as_u16(), start.elapsed());
    response
}
