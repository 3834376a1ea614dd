//! Access logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;

/// Logs one `http_request` event per response.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        warn!(
            "event=http_request module=web status={} method={} path={} duration_ms={}",
            status.as_u16(),
            method,
            path,
            started_at.elapsed().as_millis()
        );
    } else {
        info!(
            "event=http_request module=web status={} method={} path={} duration_ms={}",
            status.as_u16(),
            method,
            path,
            started_at.elapsed().as_millis()
        );
    }
    response
}
