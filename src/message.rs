// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MARKDOWN_FORMAT: &str = "markdown";

#[derive(Debug, Default, PartialEq)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub customer_id: Option<String>,
    pub api_key: Option<String>,
}

impl ChatRequest {
    /// Read the widget's fields out of a JSON object. A credential that isn't
    /// a string counts as absent; a `message` that isn't a string (or null)
    /// makes the whole request unusable.
    pub fn from_object(map: &Map<String, Value>) -> Option<Self> {
        let message = match map.get("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return None,
        };
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            message,
            customer_id: text("customerId"),
            api_key: text("apiKey"),
        })
    }
}

/// Credentials passed as `?customerId=..&apiKey=..`, used when the body has none.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialQuery {
    pub customer_id: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ChatReply {
    pub fn new(response: impl Into<String>, markdown: bool) -> Self {
        Self {
            response: response.into(),
            format: markdown.then(|| MARKDOWN_FORMAT.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
