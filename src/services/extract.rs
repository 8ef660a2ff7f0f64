//! Upstream response shaping
//!
//! Pulls the answer text and usage metadata out of whatever body the router
//! returned. Nothing here fails: unknown shapes degrade to a textual rendering.

use crate::models::TokenUsage;
use serde_json::Value;

/// One recognised answer shape
type AnswerParser = fn(&Value) -> Option<String>;

/// Parsers tried in order; the first match wins
const ANSWER_PARSERS: &[(&str, AnswerParser)] = &[
    ("chat_completion", chat_completion_content as AnswerParser),
    ("generated_text", generated_text as AnswerParser),
];

/// `{"choices": [{"message": {"content": "..."}}]}`
fn chat_completion_content(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

/// `[{"generated_text": "..."}]`
fn generated_text(body: &Value) -> Option<String> {
    body.as_array()?
        .first()?
        .get("generated_text")?
        .as_str()
        .map(str::to_string)
}

/// Best available answer text, with the name of the shape that matched
pub fn extract_answer(body: &Value) -> (String, &'static str) {
    ANSWER_PARSERS
        .iter()
        .find_map(|(name, parse)| parse(body).map(|answer| (answer, *name)))
        .unwrap_or_else(|| (render_body(body), "stringified"))
}

/// Plain strings are returned as-is, everything else as compact JSON
fn render_body(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Usage object, if it carries all three integer counts
pub fn extract_usage(body: &Value) -> Option<TokenUsage> {
    let usage = body.get("usage")?.as_object()?;
    let count = |key: &str| usage.get(key).and_then(Value::as_u64);

    Some(TokenUsage::reported(
        count("prompt_tokens")?,
        count("completion_tokens")?,
        count("total_tokens")?,
    ))
}
