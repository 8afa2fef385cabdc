// src/services/dispatcher.rs
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest, CredentialQuery},
    state::AppState,
};

/// A request that passed validation. `message` is forwarded as sent.
#[derive(Debug, PartialEq)]
pub struct ValidRequest {
    pub message: String,
    pub customer_id: Option<String>,
}

/// Handle one chat turn end to end: parse, validate, authenticate, pick a
/// backend, call it and shape the reply. `query` supplies credentials when
/// the body carries none.
pub async fn dispatch(
    state: &AppState,
    body: &[u8],
    query: CredentialQuery,
) -> Result<ChatReply, AppError> {
    let request = validate(state, body, query)?;
    info!(customer = request.customer_id.as_deref().unwrap_or("-"), "received message");
    debug!(message = %request.message);

    let mode = state.config.backend_mode().map_err(|err| {
        error!(mode = %state.config.mode, %err, "invalid MODE configuration");
        AppError::InvalidMode
    })?;
    let backend = state.backend(mode);
    info!(%mode, backend = backend.name(), "calling inference backend");

    let reply = backend.chat(&request.message).await.map_err(|err| {
        error!(backend = backend.name(), error = %format!("{err:#}"), "inference backend failed");
        AppError::Backend(err)
    })?;

    let Some(text) = reply else {
        error!(backend = backend.name(), "inference backend returned no content");
        return Err(AppError::EmptyReply);
    };
    debug!(response = %text, "AI response");

    Ok(ChatReply::new(text, state.config.markdown_format))
}

/// Steps before the backend call. Field checks come before the credential
/// lookup so a request without a message is always a 400.
pub fn validate(
    state: &AppState,
    body: &[u8],
    query: CredentialQuery,
) -> Result<ValidRequest, AppError> {
    let require_auth = state.config.require_auth;
    let malformed = || {
        if require_auth {
            AppError::InvalidFormat
        } else {
            AppError::MissingMessage
        }
    };

    let request = parse_body(body).ok_or_else(|| {
        warn!("rejected request with missing or malformed JSON body");
        malformed()
    })?;

    let credentials = if require_auth {
        let customer_id = present(request.customer_id).or_else(|| present(query.customer_id));
        let api_key = present(request.api_key).or_else(|| present(query.api_key));
        match (customer_id, api_key) {
            (Some(id), Some(key)) => Some((id, key)),
            _ => {
                warn!("rejected request without customer id or api key");
                return Err(AppError::MissingCredentials);
            }
        }
    } else {
        None
    };

    let message = request.message.filter(|m| !m.trim().is_empty()).ok_or_else(|| {
        warn!("rejected request without message");
        AppError::MissingMessage
    })?;

    let customer_id = match credentials {
        Some((id, key)) => {
            if !state.credentials.verify(&id, &key) {
                warn!(customer = %id, "rejected invalid customer id or api key");
                return Err(AppError::Unauthorized);
            }
            Some(id)
        }
        None => None,
    };

    Ok(ValidRequest { message, customer_id })
}

/// `None` for anything that isn't a non-empty JSON object with a usable
/// `message` field.
fn parse_body(body: &[u8]) -> Option<ChatRequest> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) if !map.is_empty() => ChatRequest::from_object(&map),
        _ => None,
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
