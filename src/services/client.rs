//! HTTP client service
//!
//! Encapsulates the single outbound call to the inference router

use crate::config::UpstreamConfig;
use crate::models::ChatCompletionRequest;
use crate::utils::error::{AppError, AppResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Upstream chat-completion backend
///
/// The relay only depends on this trait, so tests can count or script calls
/// without a network.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &str;

    /// Send one chat-completion request and return the decoded body
    async fn chat_completion(&self, request: &ChatCompletionRequest, api_key: &str) -> AppResult<Value>;
}

/// reqwest-backed client for an OpenAI-compatible router endpoint
#[derive(Debug, Clone)]
pub struct RouterClient {
    client: Client,
    api_url: String,
    timeout_secs: u64,
}

impl RouterClient {
    /// Create a new client instance
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("askrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            timeout_secs: config.timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Map a transport failure onto the upstream error taxonomy
    fn classify(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout(self.timeout_secs)
        } else {
            AppError::Upstream(err.to_string())
        }
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> AppResult<Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read error body from inference router: {}", e);
                String::new()
            });
            let message = upstream_error_message(&error_text).unwrap_or(error_text);
            error!("Inference router request failed: {} - {}", status, message);
            return Err(AppError::Upstream(format!("{} - {}", status, message)));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => {
                debug!("Inference router request completed successfully");
                Ok(body)
            }
            Err(e) => {
                // Non-JSON success bodies are kept as text
                warn!("Inference router returned a non-JSON body: {}", e);
                Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
    }
}

#[async_trait]
impl InferenceClient for RouterClient {
    fn name(&self) -> &str {
        "router"
    }

    async fn chat_completion(&self, request: &ChatCompletionRequest, api_key: &str) -> AppResult<Value> {
        debug!("Sending chat completion request to {}", self.api_url);

        let response = self.client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.handle_response(response).await
    }
}

/// Pull a readable message out of an error body
///
/// Accepts both `{"error": {"message": ".."}}` and `{"error": ".."}`.
fn upstream_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;

    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}
