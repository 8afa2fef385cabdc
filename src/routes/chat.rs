use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatReply, CredentialQuery},
    services::dispatcher::dispatch,
    state::SharedState,
};

/// `POST /api/send-message`. The body is taken raw so malformed JSON gets
/// the widget's error shape instead of axum's rejection. Credentials may
/// also come from the query string.
pub async fn send_message_handler(
    State(state): State<SharedState>,
    query: Result<Query<CredentialQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("send_message", %request_id);

    let query = match query {
        Ok(Query(query)) => query,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable query string");
            CredentialQuery::default()
        }
    };

    dispatch(&state, &body, query).instrument(span).await.map(Json)
}
