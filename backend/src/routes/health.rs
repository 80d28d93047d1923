use axum::Json;
use serde::Serialize;

/// Liveness payload of the local presign server
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    /// `presign-backend` crate version
    semver: String,
    /// `GIT_REV` baked in at build time, absent for local builds
    rev: Option<String>,
}

/// `GET /health` for the local server
///
/// Reports `ok` without touching S3 or resolving credentials, so it stays green
/// when signing would fail.
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
    })
}
