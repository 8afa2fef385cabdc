// src/services/inference/mod.rs
pub mod huggingface;
pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

pub use huggingface::HuggingFaceBackend;
pub use ollama::OllamaBackend;

/// A chat-completion service that turns one user message into a reply.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Short name used in logs ("ollama", "huggingface").
    fn name(&self) -> &str;

    /// `Ok(None)` means the service answered but gave no usable text.
    async fn chat(&self, message: &str) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Blank replies are treated the same as missing ones.
pub(crate) fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
