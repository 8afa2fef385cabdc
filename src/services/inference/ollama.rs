// src/services/inference/ollama.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatTurn, InferenceBackend, non_empty};
use crate::config::OllamaConfig;

/// Local Ollama server, `/api/chat` without streaming.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OllamaBackend {
    pub fn new(config: &OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", config.url.trim_end_matches('/')),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, message: &str) -> Result<Option<String>> {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: vec![ChatTurn::user(message)],
            stream: false,
        };

        let response: OllamaChatResponse = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("ollama request failed")?
            .error_for_status()
            .context("ollama returned an error status")?
            .json()
            .await
            .context("ollama returned an unreadable response")?;

        Ok(non_empty(response.message.and_then(|m| m.content)))
    }
}
