//! Analytics endpoints
//!
//! Fire-and-forget: events are logged and appended to their JSONL sink,
//! and the response is always `{ ok: true }`.

use axum::Json;
use axum::extract::State;

use shared::request::{ChatEvent, SearchEvent};
use shared::response::AnalyticsAck;

use crate::state::AppState;

pub async fn record_search(
    State(state): State<AppState>,
    Json(event): Json<SearchEvent>,
) -> Json<AnalyticsAck> {
    tracing::info!(
        search_term = %event.search_term,
        session_id = %event.session_id,
        "Search recorded"
    );
    state.analytics.record_search(&event);
    Json(AnalyticsAck::ok())
}

pub async fn record_chat(
    State(state): State<AppState>,
    Json(event): Json<ChatEvent>,
) -> Json<AnalyticsAck> {
    tracing::info!(
        messages = event.messages.len(),
        session_id = %event.session_id,
        "Chat recorded"
    );
    state.analytics.record_chat(&event);
    Json(AnalyticsAck::ok())
}
