//! Filter, sort and pagination state

use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// Category constraint: the "all" sentinel means no category filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    /// A category identifier, slug or display name
    Selected(String),
}

impl CategoryFilter {
    /// Parse the UI value: `"all"` is the no-constraint sentinel
    pub fn from_value(value: impl Into<String>) -> Self {
        let v = value.into();
        if v == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Selected(v)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// The constraint to send upstream, if any
    pub fn selected(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Selected(v) => Some(v),
        }
    }
}

/// Sort field (closed enumeration understood by the content backend)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortField {
    #[default]
    Date,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "DATE",
            SortField::Title => "TITLE",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Sort specification (field + direction)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// Full filter state owned by the catalog controller.
///
/// Any change to any field invalidates the page cursor: a cursor is only
/// valid in combination with the filter state that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub category: CategoryFilter,
    /// Selected tags (unique by slug)
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub sort: SortSpec,
}

impl FilterState {
    /// True when no constraint is active (all/empty/empty)
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.category.is_all() && self.tags.is_empty()
    }

    /// Number of active filters, for UI badges
    pub fn active_count(&self) -> usize {
        let mut n = self.tags.len();
        if !self.search_term.is_empty() {
            n += 1;
        }
        if !self.category.is_all() {
            n += 1;
        }
        n
    }
}

/// Opaque pagination continuation state, as issued by the content backend.
///
/// `end_cursor` is not interpretable; it is only valid together with the
/// filter state that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}
