// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::send_message_handler;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/send-message", post(send_message_handler))
        .route("/health", get(|| async { "OK" }))
        .route("/", get(|| async { "chat widget backend is running" }))
        .layer(TraceLayer::new_for_http())
}
