//! tooldex-server — same-origin gateway for the tooldex catalog site
//!
//! Long-running service that:
//! - Proxies opaque GraphQL queries to the headless content backend
//! - Relays chat messages to a hosted retrieval-augmented model
//! - Records search/chat analytics to append-only JSONL files

pub mod analytics;
pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod state;

// Re-export public types
pub use config::Config;
pub use state::AppState;
