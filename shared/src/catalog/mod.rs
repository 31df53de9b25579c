//! Catalog query building, wire types and normalization
//!
//! The content backend exposes a GraphQL list field over the tool
//! directory. [`ToolQuery`] renders the query document for a given
//! filter/sort/pagination request; [`wire`] mirrors the backend response
//! shape; [`normalize`] turns backend records into display models.

pub mod normalize;
pub mod query;
pub mod wire;

pub use normalize::ToolPage;
pub use query::{DEFAULT_PAGE_SIZE, ToolQuery, categories_query};
