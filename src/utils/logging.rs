//! Logging utilities
//!
//! Subscriber setup and credential-safe log summaries

use crate::config::LoggingConfig;
use crate::models::ChatCompletionRequest;
use anyhow::{Context, Result};

/// Maximum number of question characters written to debug logs
const MAX_LOGGED_CONTENT: usize = 200;

/// Initialize logging system
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format (development environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let kept: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", kept, total - max_len)
    } else {
        s.to_string()
    }
}

/// Mask a bearer credential, keeping only a short prefix for correlation
pub fn redact_credential(credential: &str) -> String {
    let prefix: String = credential.chars().take(3).collect();
    if credential.chars().count() <= 6 {
        "***".to_string()
    } else {
        format!("{}***", prefix)
    }
}

/// Outbound headers as they may appear in logs
pub fn outbound_headers_summary(credential: &str) -> serde_json::Value {
    serde_json::json!({
        "Authorization": format!("Bearer {}", redact_credential(credential)),
        "Content-Type": "application/json",
    })
}

/// Create a filtered summary of an outbound chat-completion request
pub fn create_request_log_summary(request: &ChatCompletionRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|msg| {
            serde_json::json!({
                "role": msg.role,
                "content": truncate_content(&msg.content, MAX_LOGGED_CONTENT),
            })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "messages": messages,
    })
}
