// src/routes/relay.rs
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{RelayReply, RelayRequest},
    services::reply_policy::MISSING_MESSAGE,
    state::SharedState,
};

pub async fn relay_handler(
    State(state): State<SharedState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Json<RelayReply>, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        ?payload,
        policy = state.policy.name(),
        "received from chatbot"
    );

    let message = payload.message.as_deref().unwrap_or(MISSING_MESSAGE);
    let reply = state.policy.generate_reply(message).await?;

    tracing::debug!(%request_id, reply_len = reply.len(), "reply ready");
    Ok(Json(RelayReply { reply }))
}
