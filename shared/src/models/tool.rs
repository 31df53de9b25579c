//! Tool Model
//!
//! One listed AI tool, normalized from a content-backend record.
//! Immutable once constructed; the whole list is rebuilt on every fetch.

use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// Fallback category label when a record carries no category
pub const DEFAULT_CATEGORY: &str = "Geral";

/// Normalized catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    /// Title with all markup stripped
    pub title: String,
    /// Short description with all markup stripped
    pub excerpt: String,
    /// Destination URL of the tool's detail page
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// First associated category's display name, or [`DEFAULT_CATEGORY`]
    pub category: String,
    /// Unique by slug
    pub tags: Vec<Tag>,
    /// Publish timestamp, canonical RFC 3339
    pub publish_date: String,
}
