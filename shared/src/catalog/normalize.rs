//! Record normalization
//!
//! Turns backend records into the flat display models the UI renders:
//! markup-stripped text, one category name with a fallback, tags unique
//! by slug, canonical RFC 3339 dates.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire::{CategoryNode, PageInfo, PostConnection, PostNode};
use crate::models::{Category, DEFAULT_CATEGORY, PageCursor, Tag, Tool, without_uncategorized};

/// One fetched page: normalized items plus continuation state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPage {
    pub tools: Vec<Tool>,
    pub page: PageCursor,
}

impl From<PageInfo> for PageCursor {
    fn from(info: PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            end_cursor: info.end_cursor,
        }
    }
}

/// Normalize a whole listing page
pub fn tool_page(connection: PostConnection) -> ToolPage {
    ToolPage {
        tools: connection.nodes.into_iter().map(tool_from_node).collect(),
        page: connection.page_info.into(),
    }
}

/// Normalize one backend record into a display model
pub fn tool_from_node(node: PostNode) -> Tool {
    let category = node
        .categories
        .and_then(|c| c.nodes.into_iter().next())
        .and_then(|c| c.name)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let tags = node
        .tags
        .map(|t| {
            t.nodes
                .into_iter()
                .filter_map(|t| Some(Tag::new(t.name?, t.slug?)))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Tool {
        id: node.id,
        title: strip_html(node.title.as_deref().unwrap_or_default()),
        excerpt: strip_html(node.excerpt.as_deref().unwrap_or_default()),
        url: node.link.unwrap_or_default(),
        image_url: node
            .featured_image
            .and_then(|f| f.node)
            .and_then(|n| n.source_url),
        category,
        tags: dedup_by_slug(tags),
        publish_date: canonical_date(node.date.as_deref().unwrap_or_default()),
    }
}

/// Normalize a category listing, dropping the sentinel bucket
pub fn categories(nodes: Vec<CategoryNode>) -> Vec<Category> {
    without_uncategorized(
        nodes
            .into_iter()
            .map(|n| Category {
                id: n.id,
                name: n.name,
                slug: n.slug,
            })
            .collect(),
    )
}

/// Remove all markup tags from an HTML-derived field.
///
/// Everything from `<` up to the next `>` is dropped; an unterminated tag
/// swallows the rest of the string, matching the upstream renderer.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Canonicalize a backend timestamp to RFC 3339 (UTC).
///
/// The backend emits naive `YYYY-MM-DDTHH:MM:SS` local-less timestamps;
/// offsets are honored when present. Unparseable input passes through.
pub fn canonical_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Utc)
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return naive
            .and_utc()
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    }
    raw.to_string()
}

/// Dedup preserving received order (no vocabulary sorting here)
fn dedup_by_slug(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|t| seen.insert(t.slug.clone()))
        .collect()
}
