//! Prometheus metrics for adcraft-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

const HTTP_REQUESTS_TOTAL: &str = "adcraft_http_requests_total";
const HTTP_REQUEST_DURATION: &str = "adcraft_http_request_duration_seconds";
const UPLOADS_TOTAL: &str = "adcraft_uploads_total";
const UPLOAD_BYTES: &str = "adcraft_upload_bytes";
const EXPORTS_TOTAL: &str = "adcraft_exports_total";
const VALIDATION_FAILURES_TOTAL: &str = "adcraft_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// Record an upload attempt.
///
/// # Arguments
///
/// * `outcome` - "accepted" or "rejected"
/// * `bytes` - Size of the uploaded file
#[allow(clippy::cast_precision_loss)]
pub fn record_upload(outcome: &str, bytes: usize) {
    counter!(UPLOADS_TOTAL, "outcome" => outcome.to_string()).increment(1);
    histogram!(UPLOAD_BYTES).record(bytes as f64);
}

/// Record an export.
///
/// # Arguments
///
/// * `format` - Output format ("png", "jpg", "pdf", "svg")
/// * `success` - Whether the export succeeded
pub fn record_export(format: &str, success: bool) {
    counter!(
        EXPORTS_TOTAL,
        "format" => format.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
}

/// Record an input validation failure.
pub fn record_validation_failure(validation_type: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "type" => validation_type.to_string()
    )
    .increment(1);
}

/// Middleware recording request counts and latency per matched route.
pub async fn track_http(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
