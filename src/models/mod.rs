//! Data models module
//!
//! Defines the inbound ask payloads and the outbound chat-completion payload

pub mod ask;
pub mod chat;

pub use ask::{AskRequest, AskResponse, TokenUsage, ESTIMATED_NOTE};
pub use chat::{ChatCompletionRequest, ChatMessage};
