//! Service layer module
//!
//! Contains the upstream client, response shaping, pricing, and the relay

pub mod client;
pub mod extract;
pub mod pricing;
pub mod relay;

pub use client::{InferenceClient, RouterClient};
pub use relay::Relay;
