//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default chat-completion endpoint of the inference router
pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default model used when a request carries no override
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:groq";

/// Credential variables, checked in order
pub const CREDENTIAL_VARS: [&str; 3] = ["HF_API_KEY", "HF_TOKEN", "HUGGINGFACE_API_KEY"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream router configuration
    pub upstream: UpstreamConfig,
    /// Cost estimation rates
    pub pricing: PricingConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream inference router configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Bearer credential; `None` when no variable is set
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Chat-completion endpoint URL
    pub api_url: String,
    /// Model used when the request has no override
    pub default_model: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Price per 1000 tokens, in USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub prompt_per_1k: f64,
    pub completion_per_1k: f64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum inbound request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// `new` passes the process environment; tests pass a map so they never
    /// touch global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_key = CREDENTIAL_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: parse_value(&get("SERVER_PORT", "8000"), "SERVER_PORT")?,
            },
            upstream: UpstreamConfig {
                api_key,
                api_url: get("HF_API_URL", DEFAULT_API_URL),
                default_model: get("HF_DEFAULT_MODEL", DEFAULT_MODEL),
                timeout: parse_value(&get("REQUEST_TIMEOUT", "60"), "REQUEST_TIMEOUT")?,
            },
            pricing: PricingConfig {
                prompt_per_1k: parse_value(&get("COST_PER_1K_PROMPT", "0.0"), "COST_PER_1K_PROMPT")?,
                completion_per_1k: parse_value(
                    &get("COST_PER_1K_COMPLETION", "0.0"),
                    "COST_PER_1K_COMPLETION",
                )?,
            },
            request: RequestConfig {
                max_request_size: parse_value(&get("MAX_REQUEST_SIZE", "1048576"), "MAX_REQUEST_SIZE")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: parse_value(&get("CORS_ENABLED", "true"), "CORS_ENABLED")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.upstream.api_url.starts_with("http") {
            anyhow::bail!("Invalid upstream URL format, should start with 'http'");
        }

        if self.upstream.default_model.trim().is_empty() {
            anyhow::bail!("Default model cannot be empty");
        }

        if self.upstream.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        for (name, rate) in [
            ("COST_PER_1K_PROMPT", self.pricing.prompt_per_1k),
            ("COST_PER_1K_COMPLETION", self.pricing.completion_per_1k),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}", name, rate);
            }
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether an upstream credential is available
    pub fn has_credential(&self) -> bool {
        self.upstream.api_key.is_some()
    }
}

fn parse_value<T>(raw: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
}
