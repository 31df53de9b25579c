//! Catalog query builder
//!
//! Renders the GraphQL document understood by the content backend from a
//! filter/sort/pagination request. Constraints are applied conjunctively;
//! absent constraints are omitted entirely rather than passed as match-all
//! sentinels, so the backend query is never over-constrained.

use crate::models::{FilterState, SortSpec};

/// Default page size for tool listings
pub const DEFAULT_PAGE_SIZE: u32 = 21;

/// A filter/sort/pagination request against the tool listing.
///
/// Building the same request twice produces byte-identical documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolQuery {
    /// Free-text search term; empty means no search constraint
    pub search_term: Option<String>,
    /// Category identifier or name; `None` means no category constraint
    pub category: Option<String>,
    /// Tag slugs; the backend matches items carrying any of them
    pub tags: Vec<String>,
    /// Requested sort order; `None` lets the backend use its default
    pub sort: Option<SortSpec>,
    /// Page size
    pub first: u32,
    /// Continuation cursor from a previous page, absent on the first page
    pub after: Option<String>,
}

impl Default for ToolQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            category: None,
            tags: Vec::new(),
            sort: None,
            first: DEFAULT_PAGE_SIZE,
            after: None,
        }
    }
}

impl ToolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the first-page request for a filter state.
    ///
    /// The cursor is deliberately not carried over: a cursor is only valid
    /// with the filter state that produced it.
    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            search_term: (!filters.search_term.is_empty()).then(|| filters.search_term.clone()),
            category: filters.category.selected().map(str::to_string),
            tags: filters.tags.iter().map(|t| t.slug.clone()).collect(),
            sort: Some(filters.sort),
            first: DEFAULT_PAGE_SIZE,
            after: None,
        }
    }

    /// Continue the same request after a cursor
    pub fn with_after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Render the GraphQL document for this request
    pub fn build(&self) -> String {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(category) = &self.category {
            // Numeric input selects by id, anything else by name
            match category.parse::<i64>() {
                Ok(id) => where_clauses.push(format!("categoryId: {id}")),
                Err(_) => {
                    where_clauses.push(format!("categoryName: \"{}\"", escape_string(category)))
                }
            }
        }
        if !self.tags.is_empty() {
            let formatted = self
                .tags
                .iter()
                .map(|t| format!("\"{}\"", escape_string(t)))
                .collect::<Vec<_>>()
                .join(", ");
            where_clauses.push(format!("tagIn: [{formatted}]"));
        }
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.is_empty()) {
            where_clauses.push(format!("search: \"{}\"", escape_string(term)));
        }
        if let Some(sort) = &self.sort {
            where_clauses.push(format!(
                "orderby: {{ field: {}, order: {} }}",
                sort.field.as_str(),
                sort.order.as_str()
            ));
        }

        let mut args = vec![format!("first: {}", self.first)];
        if !where_clauses.is_empty() {
            args.push(format!("where: {{ {} }}", where_clauses.join(", ")));
        }
        if let Some(after) = &self.after {
            args.push(format!("after: \"{}\"", escape_string(after)));
        }

        format!(
            "query ToolListing {{\n  \
               posts({args}) {{\n    \
                 nodes {{\n      \
                   id\n      \
                   title\n      \
                   excerpt\n      \
                   date\n      \
                   slug\n      \
                   link\n      \
                   featuredImage {{ node {{ sourceUrl(size: LARGE) }} }}\n      \
                   categories {{ nodes {{ name }} }}\n      \
                   tags {{ nodes {{ name slug }} }}\n    \
                 }}\n    \
                 pageInfo {{\n      \
                   hasNextPage\n      \
                   endCursor\n    \
                 }}\n  \
               }}\n\
             }}",
            args = args.join(", ")
        )
    }
}

/// Fixed document fetching the category reference list
pub fn categories_query() -> String {
    "query AllCategories {\n  \
       categories(first: 200) {\n    \
         nodes {\n      \
           id\n      \
           name\n      \
           slug\n    \
         }\n  \
       }\n\
     }"
    .to_string()
}

/// Escape a value for inclusion in a double-quoted GraphQL string literal
fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
