// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;

/// Everything the send-message endpoint can fail with.
///
/// Display strings are what the widget shows, so they are part of the API.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request format. JSON payload is required")]
    InvalidFormat,
    #[error("No message provided")]
    MissingMessage,
    #[error("Customer ID or API Key missing")]
    MissingCredentials,
    /// Unknown customer and wrong key are reported the same way.
    #[error("Invalid Customer ID or API Key")]
    Unauthorized,
    #[error("Invalid MODE configuration")]
    InvalidMode,
    #[error("Error communicating with the AI model")]
    EmptyReply,
    #[error("{0:#}")]
    Backend(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFormat | Self::MissingMessage | Self::MissingCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::InvalidMode | Self::EmptyReply | Self::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
