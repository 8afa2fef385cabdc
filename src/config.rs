// src/config.rs
use std::{fmt, net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{Context, Result, bail};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MODE: &str = "local";
pub const DEFAULT_CUSTOMERS_FILE: &str = "customers.txt";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral:latest";
pub const DEFAULT_HF_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_HF_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct";
pub const DEFAULT_HF_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Which inference backend a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Local,
    Remote,
}

impl FromStr for BackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

#[derive(Clone)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

#[derive(Clone)]
pub struct HuggingFaceConfig {
    pub url: String,
    pub model: String,
    pub token: Option<String>,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl fmt::Debug for OllamaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaConfig")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Raw mode string. Checked on every request so a bad value surfaces
    /// as a 500 instead of stopping the server.
    pub mode: String,
    pub require_auth: bool,
    pub markdown_format: bool,
    pub customers_file: PathBuf,
    pub log_level: tracing::Level,
    pub ollama: OllamaConfig,
    pub huggingface: HuggingFaceConfig,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = get("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;
        let log_level = get("LOG_LEVEL", "info")
            .parse::<tracing::Level>()
            .context("LOG_LEVEL must be one of trace, debug, info, warn, error")?;
        let max_tokens = match lookup("HF_MAX_TOKENS") {
            Some(raw) => raw.parse::<u32>().context("HF_MAX_TOKENS must be a positive integer")?,
            None => DEFAULT_HF_MAX_TOKENS,
        };

        Ok(Self {
            bind_addr,
            mode: get("MODE", DEFAULT_MODE),
            require_auth: parse_flag("REQUIRE_AUTH", lookup("REQUIRE_AUTH"), true)?,
            markdown_format: parse_flag("MARKDOWN_FORMAT", lookup("MARKDOWN_FORMAT"), true)?,
            customers_file: PathBuf::from(get("CUSTOMERS_FILE", DEFAULT_CUSTOMERS_FILE)),
            log_level,
            ollama: OllamaConfig {
                url: get("OLLAMA_URL", DEFAULT_OLLAMA_URL),
                model: get("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            },
            huggingface: HuggingFaceConfig {
                url: get("HF_API_URL", DEFAULT_HF_API_URL),
                model: get("HF_MODEL", DEFAULT_HF_MODEL),
                token: lookup("HF_API_TOKEN").filter(|t| !t.trim().is_empty()),
                max_tokens,
                system_prompt: get("HF_SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            },
        })
    }

    pub fn backend_mode(&self) -> Result<BackendMode, String> {
        self.mode.parse()
    }
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
