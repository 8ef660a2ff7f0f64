//! Configuration management module
//!
//! Loads the immutable, environment-sourced settings used by the relay

pub mod settings;

pub use settings::{
    LoggingConfig, PricingConfig, RequestConfig, SecurityConfig, ServerConfig, Settings,
    UpstreamConfig,
};
