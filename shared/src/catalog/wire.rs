//! Wire shapes of the content backend's GraphQL responses
//!
//! These structs mirror the upstream schema closely enough to
//! deserialize; normalization into display models happens in
//! [`super::normalize`]. Tag and category blocks are parsed leniently:
//! malformed data degrades to "no tags"/"no categories" rather than
//! failing the whole page.

use serde::{Deserialize, Deserializer};

/// GraphQL response envelope: `data` and/or an `errors` list
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlEnvelope<T> {
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> GraphqlEnvelope<T> {
    /// True when the backend reported any error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
}

/// `data` payload of a tool-listing query
#[derive(Debug, Clone, Deserialize)]
pub struct PostsData {
    #[serde(default = "none")]
    pub posts: Option<PostConnection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConnection {
    #[serde(default)]
    pub nodes: Vec<PostNode>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One backend record of the tool listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<NodeList<CategoryRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<NodeList<TagRef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedImage {
    pub node: Option<ImageNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Generic `{ nodes: [...] }` wrapper used by the backend for relations
#[derive(Debug, Clone, Deserialize)]
pub struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// `data` payload of the category listing query
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesData {
    #[serde(default = "none")]
    pub categories: Option<NodeList<CategoryNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Deserialize to `Some(T)` on success, `None` on any mismatch.
///
/// The backend occasionally hands back `false`/`null`/scalar garbage where
/// a relation object is expected; such records keep their other fields.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
