use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};

/// Log one line per request with method, path, status and latency.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = elapsed_millis(started.elapsed());
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "request handled");
    }

    response
}

/// Whole milliseconds, clamped to `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
