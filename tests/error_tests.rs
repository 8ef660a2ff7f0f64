//! Error handling module unit tests

use askrelay::utils::error::*;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[test]
fn test_app_error_status_codes() {
    let test_cases = vec![
        (AppError::Config("test".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Upstream("test".to_string()), StatusCode::BAD_GATEWAY),
        (AppError::Timeout(60), StatusCode::GATEWAY_TIMEOUT),
        (AppError::Validation("test".to_string()), StatusCode::UNPROCESSABLE_ENTITY),
        (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
    ];

    for (error, expected_status) in test_cases {
        assert_eq!(error.status_code(), expected_status);
    }
}

#[test]
fn test_app_error_types() {
    let test_cases = vec![
        (AppError::Config("test".to_string()), "configuration_error"),
        (AppError::Upstream("test".to_string()), "upstream_error"),
        (AppError::Timeout(60), "timeout_error"),
        (AppError::Validation("test".to_string()), "invalid_request_error"),
        (AppError::PayloadTooLarge, "invalid_request_error"),
    ];

    for (error, expected_type) in test_cases {
        assert_eq!(error.error_type(), expected_type);
    }
}

#[test]
fn test_upstream_classification() {
    assert!(AppError::Upstream("connection refused".to_string()).is_upstream());
    assert!(AppError::Timeout(60).is_upstream());
    assert!(!AppError::Config("missing key".to_string()).is_upstream());
    assert!(!AppError::Validation("bad body".to_string()).is_upstream());
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Config("HF_API_KEY not set".to_string()).to_string(),
        "Configuration error: HF_API_KEY not set"
    );
    assert_eq!(
        AppError::Upstream("502 Bad Gateway - overloaded".to_string()).to_string(),
        "Inference router request failed: 502 Bad Gateway - overloaded"
    );
}

#[tokio::test]
async fn test_into_response_body() {
    let response = AppError::Config("HF_API_KEY not set".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["detail"], "Configuration error: HF_API_KEY not set");
    assert_eq!(json["type"], "configuration_error");
}
