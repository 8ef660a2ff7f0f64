//! Token estimation and cost calculation
//!
//! Linear per-1000-token pricing plus a word-count fallback estimator

use crate::config::PricingConfig;

/// Tokens assumed per whitespace-separated word
const TOKENS_PER_WORD: f64 = 1.3;

/// Rough token count of a text: `max(1, floor(words * 1.3))`
pub fn estimate_tokens(text: &str) -> u64 {
    let words = text.split_whitespace().count();
    let tokens = (words as f64 * TOKENS_PER_WORD) as u64;
    tokens.max(1)
}

impl PricingConfig {
    /// Estimated USD cost of a request, unrounded
    pub fn estimate_cost(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        (prompt_tokens as f64 / 1000.0) * self.prompt_per_1k
            + (completion_tokens as f64 / 1000.0) * self.completion_per_1k
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
