// src/services/inference/huggingface.rs
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatTurn, InferenceBackend, non_empty};
use crate::config::HuggingFaceConfig;

/// Hosted model behind an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct HuggingFaceBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    token: Option<String>,
    max_tokens: u32,
    system_prompt: String,
}

impl std::fmt::Debug for HuggingFaceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceBackend")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn>,
    stream: bool,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl HuggingFaceBackend {
    pub fn new(config: &HuggingFaceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.url.clone(),
            model: config.model.clone(),
            token: config.token.clone(),
            max_tokens: config.max_tokens,
            system_prompt: config.system_prompt.clone(),
        }
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceBackend {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn chat(&self, message: &str) -> Result<Option<String>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("HF_API_TOKEN is not configured"))?;

        let body = CompletionRequest {
            model: &self.model,
            messages: vec![ChatTurn::system(&self.system_prompt), ChatTurn::user(message)],
            stream: false,
            max_tokens: self.max_tokens,
        };

        let response: CompletionResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("huggingface request failed")?
            .error_for_status()
            .context("huggingface returned an error status")?
            .json()
            .await
            .context("huggingface returned an unreadable response")?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        Ok(non_empty(text))
    }
}
