//! Shared types for tooldex
//!
//! Common types used by both the gateway server and the client library:
//! domain models, the unified error system, catalog query building and
//! normalization, and the chat/analytics wire payloads.

pub mod catalog;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

// Catalog re-exports (query building + page results)
pub use catalog::{ToolPage, ToolQuery};
