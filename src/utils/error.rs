//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error, raised before any outbound call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream transport or status failure
    #[error("Inference router request failed: {0}")]
    Upstream(String),

    /// Upstream call exceeded the configured timeout
    #[error("Inference router request timed out after {0}s")]
    Timeout(u64),

    /// Malformed inbound request body
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Inbound body exceeds the configured limit
    #[error("Payload too large")]
    PayloadTooLarge,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure message
    pub detail: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Config(_) => "configuration_error",
            AppError::Upstream(_) => "upstream_error",
            AppError::Timeout(_) => "timeout_error",
            AppError::Validation(_) | AppError::PayloadTooLarge => "invalid_request_error",
        }
    }

    /// Whether the failure originated at the inference router
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Upstream(_) | AppError::Timeout(_))
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
            error_type: self.error_type().to_string(),
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_upstream() {
            tracing::warn!("Upstream error: {} - Status code: {}", self, status);
        } else if status.is_client_error() {
            tracing::warn!("Client error: {} - Status code: {}", self.error_type(), status);
        } else {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
