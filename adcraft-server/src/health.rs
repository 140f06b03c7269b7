//! Health check endpoints for container probes.
//!
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)
//! - `/health` - Combined check

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Font faces available to export. Zero means text will not render.
    pub font_faces: usize,
    /// Configured front-end directory exists (true when none is configured)
    pub web_dir: bool,
}

impl HealthChecks {
    /// Whether the service can take traffic.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.web_dir
    }
}

/// Liveness probe - is the server running?
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - is the server ready to accept traffic?
///
/// A missing font database only logs a warning: exports still succeed,
/// without text.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let checks = HealthChecks {
        font_faces: state.exporter.font_count(),
        web_dir: match &state.config.web_dir {
            Some(dir) => dir.is_dir(),
            None => true,
        },
    };

    if checks.font_faces == 0 {
        tracing::warn!("No system fonts found; exported text will be missing");
    }

    let ready = checks.ready();
    let status = HealthStatus {
        status: if ready { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}
