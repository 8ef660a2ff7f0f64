//! Chat-completion data models
//!
//! Outbound payload accepted by OpenAI-compatible routers

use serde::{Deserialize, Serialize};

/// Chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Message list
    pub messages: Vec<ChatMessage>,
    /// Target model
    pub model: String,
}

/// Role-tagged message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl ChatCompletionRequest {
    /// Single-turn request carrying one user message
    pub fn single_turn(model: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(question)],
            model: model.into(),
        }
    }
}
