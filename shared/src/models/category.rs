//! Category Model

use serde::{Deserialize, Serialize};

/// Sentinel bucket the content backend assigns to uncategorized items.
/// Filtered out of every category listing before use.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Category entity (read-only reference data from the content backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Category {
    /// The value a filter should carry for this category (slug preferred)
    pub fn filter_value(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.name)
    }
}

/// Drop the sentinel "Uncategorized" bucket from a category listing
pub fn without_uncategorized(categories: Vec<Category>) -> Vec<Category> {
    categories
        .into_iter()
        .filter(|c| c.name != UNCATEGORIZED)
        .collect()
}
