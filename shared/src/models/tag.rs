//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity: a display name plus the slug used for filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Deduplicate tags by slug (first occurrence wins) and sort by display name
pub fn dedup_tags(tags: impl IntoIterator<Item = Tag>) -> Vec<Tag> {
    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<Tag> = tags
        .into_iter()
        .filter(|t| !t.slug.is_empty() && seen.insert(t.slug.clone()))
        .collect();
    unique.sort_by(|a, b| a.name.cmp(&b.name));
    unique
}
