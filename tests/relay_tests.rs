//! Upstream client and relay tests against a mocked inference router

use askrelay::config::{Settings, UpstreamConfig};
use askrelay::models::{AskRequest, ChatCompletionRequest};
use askrelay::services::{InferenceClient, Relay, RouterClient};
use askrelay::utils::error::AppError;
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const CHAT_PATH: &str = "/v1/chat/completions";

fn upstream_config(server: &MockServer, timeout: u64) -> UpstreamConfig {
    UpstreamConfig {
        api_key: Some("hf_relay_key".to_string()),
        api_url: server.url(CHAT_PATH),
        default_model: "openai/gpt-oss-20b:groq".to_string(),
        timeout,
    }
}

fn relay_for(server: &MockServer, pairs: &[(&str, &str)]) -> Relay {
    let mut vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert("HF_API_URL".to_string(), server.url(CHAT_PATH));
    let settings = Settings::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let client = RouterClient::new(&settings.upstream).unwrap();
    Relay::new(Arc::new(settings), Arc::new(client))
}

#[tokio::test]
async fn test_client_sends_bearer_and_payload() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path(CHAT_PATH)
            .header("authorization", "Bearer hf_relay_key")
            .json_body(json!({
                "messages": [{"role": "user", "content": "ping"}],
                "model": "some/model"
            }));
        then.status(200).json_body(json!({"choices": [{"message": {"content": "pong"}}]}));
    }).await;

    let client = RouterClient::new(&upstream_config(&server, 60)).unwrap();
    let body = client
        .chat_completion(&ChatCompletionRequest::single_turn("some/model", "ping"), "hf_relay_key")
        .await
        .unwrap();

    assert_eq!(body["choices"][0]["message"]["content"], "pong");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_non_json_success_body_kept_as_text() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).body("plain answer");
    }).await;

    let client = RouterClient::new(&upstream_config(&server, 60)).unwrap();
    let body = client
        .chat_completion(&ChatCompletionRequest::single_turn("m", "q"), "hf_relay_key")
        .await
        .unwrap();

    assert_eq!(body, json!("plain answer"));
}

#[tokio::test]
async fn test_client_server_error_status() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(503).json_body(json!({"error": {"message": "Model is overloaded", "type": "server_error"}}));
    }).await;

    let client = RouterClient::new(&upstream_config(&server, 60)).unwrap();
    let err = client
        .chat_completion(&ChatCompletionRequest::single_turn("m", "q"), "hf_relay_key")
        .await
        .unwrap_err();

    match err {
        AppError::Upstream(message) => {
            assert!(message.contains("503"));
            assert!(message.contains("Model is overloaded"));
        }
        other => panic!("Expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_error_status_with_empty_body() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(500);
    }).await;

    let client = RouterClient::new(&upstream_config(&server, 60)).unwrap();
    let err = client
        .chat_completion(&ChatCompletionRequest::single_turn("m", "q"), "hf_relay_key")
        .await
        .unwrap_err();

    match err {
        AppError::Upstream(message) => assert!(message.starts_with("500 Internal Server Error")),
        other => panic!("Expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_timeout() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).delay(Duration::from_secs(3)).json_body(json!({}));
    }).await;

    let client = RouterClient::new(&upstream_config(&server, 1)).unwrap();
    let err = client
        .chat_completion(&ChatCompletionRequest::single_turn("m", "q"), "hf_relay_key")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Timeout(1)));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_client_connection_refused() {
    let upstream = UpstreamConfig {
        api_key: Some("hf_relay_key".to_string()),
        // Port 9 (discard) is closed on test hosts
        api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        default_model: "m".to_string(),
        timeout: 5,
    };

    let client = RouterClient::new(&upstream).unwrap();
    let err = client
        .chat_completion(&ChatCompletionRequest::single_turn("m", "q"), "hf_relay_key")
        .await
        .unwrap_err();

    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_relay_stringifies_unknown_shape() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({"output": "unexpected"}));
    }).await;

    let relay = relay_for(&server, &[("HF_API_KEY", "hf_relay_key")]);
    let response = relay.ask(AskRequest::new("what now")).await.unwrap();

    assert_eq!(response.answer, r#"{"output":"unexpected"}"#);
    assert!(response.tokens.is_estimated());
    assert_eq!(response.tokens.prompt_tokens, 2);
    assert_eq!(response.raw_response, json!({"output": "unexpected"}));
}

#[tokio::test]
async fn test_relay_partial_usage_is_estimated() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "a b c d e f g h i j"}}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 10}
        }));
    }).await;

    let relay = relay_for(&server, &[
        ("HF_API_KEY", "hf_relay_key"),
        ("COST_PER_1K_PROMPT", "1.0"),
        ("COST_PER_1K_COMPLETION", "2.0"),
    ]);
    let response = relay.ask(AskRequest::new("one two three")).await.unwrap();

    assert!(response.tokens.is_estimated());
    assert_eq!(response.tokens.prompt_tokens, 3);
    assert_eq!(response.tokens.completion_tokens, 13);
    assert_eq!(response.tokens.total_tokens, 16);
    // 3/1000 * 1.0 + 13/1000 * 2.0
    assert_eq!(response.estimated_cost_usd, 0.029);
}

#[tokio::test]
async fn test_relay_missing_credential_makes_no_call() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({}));
    }).await;

    let relay = relay_for(&server, &[]);
    let err = relay.ask(AskRequest::new("hello")).await.unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    mock.assert_hits_async(0).await;
}
