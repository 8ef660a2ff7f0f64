//! Question relay
//!
//! Resolves model and credential, makes the upstream call, and shapes the
//! answer with latency, token and cost metadata.

use crate::config::Settings;
use crate::models::{AskRequest, AskResponse, ChatCompletionRequest, TokenUsage};
use crate::services::client::InferenceClient;
use crate::services::extract::{extract_answer, extract_usage};
use crate::services::pricing::{estimate_tokens, round_to};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::{create_request_log_summary, outbound_headers_summary, truncate_content};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Relays questions to the inference router
#[derive(Clone)]
pub struct Relay {
    settings: Arc<Settings>,
    client: Arc<dyn InferenceClient>,
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("client", &self.client.name())
            .field("default_model", &self.settings.upstream.default_model)
            .finish()
    }
}

impl Relay {
    pub fn new(settings: Arc<Settings>, client: Arc<dyn InferenceClient>) -> Self {
        Self { settings, client }
    }

    /// Model the request will be sent to
    pub fn resolve_model<'a>(&'a self, request: &'a AskRequest) -> &'a str {
        request
            .model_override()
            .unwrap_or(&self.settings.upstream.default_model)
    }

    /// Answer one question
    pub async fn ask(&self, request: AskRequest) -> AppResult<AskResponse> {
        let model = self.resolve_model(&request).to_string();

        let api_key = self.settings.upstream.api_key.as_deref().ok_or_else(|| {
            AppError::Config("HF_API_KEY, HF_TOKEN or HUGGINGFACE_API_KEY not set in environment".to_string())
        })?;

        let chat_request = ChatCompletionRequest::single_turn(model.as_str(), request.question.as_str());

        info!(
            "Question: {} Model: {} Headers: {}",
            truncate_content(&request.question, 200),
            model,
            outbound_headers_summary(api_key)
        );
        if let Ok(summary_json) = serde_json::to_string_pretty(&create_request_log_summary(&chat_request)) {
            debug!("📤 Outbound Request:\n{}", summary_json);
        }

        let start = Instant::now();
        let outcome = self.client.chat_completion(&chat_request, api_key).await;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let body = match outcome {
            Ok(body) => body,
            Err(e) => {
                warn!("Upstream call via {} failed after {:.2}ms: {}", self.client.name(), latency_ms, e);
                return Err(e);
            }
        };

        let (answer, shape) = extract_answer(&body);
        debug!("Answer extracted using {} shape", shape);

        let tokens = extract_usage(&body).unwrap_or_else(|| {
            TokenUsage::estimated(estimate_tokens(&request.question), estimate_tokens(&answer))
        });

        let cost = self
            .settings
            .pricing
            .estimate_cost(tokens.prompt_tokens, tokens.completion_tokens);

        info!(
            "Answered in {:.2}ms - tokens: {} (estimated: {}), cost: ${:.6}",
            latency_ms,
            tokens.total_tokens,
            tokens.is_estimated(),
            cost
        );

        Ok(AskResponse {
            question: request.question,
            answer,
            model,
            latency_ms: round_to(latency_ms, 2),
            tokens,
            estimated_cost_usd: round_to(cost, 6),
            raw_response: body,
        })
    }
}
