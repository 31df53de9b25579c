//! Assistant gateway endpoint
//!
//! Accepts both historical body shapes (`{messages}` and
//! `{history, message}`), relays the canonicalized conversation to the
//! configured model backend and returns the extracted text. Each call is
//! independent: history is client-supplied and replayed, nothing is
//! stored server-side.

use axum::Json;
use axum::extract::State;

use shared::error::{AppError, ErrorCode};
use shared::request::ChatRequest;
use shared::response::ChatReply;

use crate::assistant::FALLBACK_REPLY;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    // Validate before touching the upstream: an empty message list must
    // never produce a model call.
    let messages = request.into_messages()?;

    let Some(backend) = state.assistant.as_ref() else {
        tracing::error!("Chat request received but no assistant backend is configured");
        return Err(AppError::new(ErrorCode::AssistantNotConfigured));
    };

    match backend.generate(&messages).await {
        Ok(text) if text.trim().is_empty() => Ok(Json(ChatReply {
            response: FALLBACK_REPLY.to_string(),
        })),
        Ok(text) => Ok(Json(ChatReply { response: text })),
        Err(err) => {
            tracing::error!(error = %err, "Assistant upstream call failed");
            Err(AppError::new(ErrorCode::AssistantUpstreamError))
        }
    }
}
