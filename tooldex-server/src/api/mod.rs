//! API routes for tooldex-server

pub mod analytics;
pub mod chat;
pub mod graphql;
pub mod health;

use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Same-origin API surface used by the site
    let api = Router::new()
        .route("/api/graphql", post(graphql::proxy))
        .route("/api/chat", post(chat::chat))
        .route("/api/analytics/search", post(analytics::record_search))
        .route("/api/analytics/chat", post(analytics::record_chat));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
