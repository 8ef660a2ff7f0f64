//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Service name reported by health endpoints
pub const SERVICE_NAME: &str = "askrelay";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Whether an upstream credential is configured
    pub credential: String,
    /// Model used without an override
    pub default_model: String,
    /// Upstream chat-completion endpoint
    pub upstream_url: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
/// Reports `degraded` when no credential is configured, since every ask
/// would then fail.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let has_credential = state.settings.has_credential();

    let details = HealthDetails {
        credential: if has_credential { "configured" } else { "missing" }.to_string(),
        default_model: state.settings.upstream.default_model.clone(),
        upstream_url: state.settings.upstream.api_url.clone(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    };

    Json(HealthResponse {
        status: if has_credential { "healthy" } else { "degraded" }.to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(details),
    })
}

/// Liveness check
///
/// GET /health/live
/// Confirms the process is serving; no dependency checks.
pub async fn liveness_check() -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(HealthResponse {
        status: "alive".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: None,
    })
}
