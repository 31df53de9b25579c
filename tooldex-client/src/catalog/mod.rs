//! Catalog fetching and list-state management

pub mod controller;
pub mod fetcher;
