//! LLM provider abstraction backing every agent.

mod openrouter;

pub use openrouter::OpenRouterProvider;

use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    // Run a structured conversation against the selected model, returning the raw completion
    async fn generate(&self, model_id: &str, messages: &[ChatMessage]) -> Result<String>;
}
