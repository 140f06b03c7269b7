//! # Adcraft Server Library
//!
//! Router, handlers and shared state for the Adcraft service.
//! This library is used by both the binary and integration tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use adcraft_renderer::{SceneExporter, UploadDecoder};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use config::{CliArgs, ServerConfig};
pub use error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration.
    pub config: Arc<ServerConfig>,
    /// Upload decoder.
    pub decoder: UploadDecoder,
    /// Scene exporter with its loaded font database.
    pub exporter: Arc<SceneExporter>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state for `config`. Loads system fonts.
    #[must_use]
    pub fn new(config: ServerConfig, metrics: Option<PrometheusHandle>) -> Self {
        let decoder = UploadDecoder::new(config.max_image_dimension);
        Self {
            config: Arc::new(config),
            decoder,
            exporter: Arc::new(SceneExporter::with_defaults()),
            metrics,
        }
    }
}

/// Build a CORS layer that only allows localhost origins.
#[must_use]
pub fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        // Common development ports for dev servers
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(), // Vite
        "http://localhost:8080".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://127.0.0.1:8080".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the full application router.
///
/// Serves the front-end from `config.web_dir` as the fallback when set.
pub fn build_router(state: AppState) -> Router {
    let port = state.config.port;
    let body_limit = state.config.max_body_bytes();
    let web_dir = state.config.web_dir.clone();

    let api = Router::new()
        .route("/api/upload", post(routes::upload))
        .route("/api/export/image", post(routes::export_image))
        .route("/api/export/pdf", post(routes::export_pdf))
        .route("/api/render", post(routes::render_session))
        .route("/api/templates", get(routes::templates))
        .route("/api/orientations", get(routes::orientations))
        .layer(DefaultBodyLimit::max(body_limit));

    let mut app = Router::new()
        .merge(api)
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness));

    if let Some(dir) = web_dir {
        tracing::info!("Serving web files from: {:?}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(middleware::from_fn(metrics::track_http))
        // Request ID for tracing correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(port))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Prometheus metrics endpoint.
#[tracing::instrument(name = "metrics", skip(state))]
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(ServerConfig::default(), None)
    }

    #[tokio::test]
    async fn test_liveness_route() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health/live").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = build_router(test_state())
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_without_web_dir() {
        let response = build_router(test_state())
            .oneshot(Request::get("/index.html").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let state = AppState::new(
            ServerConfig {
                max_upload_bytes: 16,
                ..ServerConfig::default()
            },
            None,
        );
        let body = serde_json::json!({
            "imageData": format!("data:image/png;base64,{}", "A".repeat(64))
        });
        let response = build_router(state)
            .oneshot(
                Request::post("/api/export/pdf")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(json["success"], false);
    }
}
