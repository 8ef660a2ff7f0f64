//! Ask endpoint data models
//!
//! Request and response bodies of `POST /ask`

use serde::{Deserialize, Serialize};

/// Note attached to token counts that come from the local estimator
pub const ESTIMATED_NOTE: &str = "estimated via word count (rough approximation)";

/// Inbound question
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    /// Question forwarded verbatim as the user message
    pub question: String,
    /// Model override (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Model override, ignoring empty strings
    pub fn model_override(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }
}

/// Token usage, either reported by the upstream or estimated locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Present only when the counts were estimated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TokenUsage {
    /// Usage as reported by the upstream
    pub fn reported(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
            note: None,
        }
    }

    /// Locally estimated usage; total is the sum of both sides
    pub fn estimated(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
            note: Some(ESTIMATED_NOTE.to_string()),
        }
    }

    pub fn is_estimated(&self) -> bool {
        self.note.is_some()
    }
}

/// Result of one relayed question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Original question
    pub question: String,
    /// Best available answer text
    pub answer: String,
    /// Model the question was sent to
    pub model: String,
    /// Wall-clock latency of the upstream call, 2 decimals
    pub latency_ms: f64,
    /// Token usage
    pub tokens: TokenUsage,
    /// Estimated cost in USD, 6 decimals
    pub estimated_cost_usd: f64,
    /// Upstream body, unmodified
    pub raw_response: serde_json::Value,
}
