//! Catalog fetcher
//!
//! Builds the listing query, posts it through the same-origin GraphQL
//! proxy, and normalizes the result. A transport failure and a
//! backend-reported error list are the same thing to the caller: one
//! generic [`ClientError::FetchFailed`], no partial results.

use async_trait::async_trait;
use std::sync::Arc;

use shared::catalog::wire::{CategoriesData, GraphqlEnvelope, PostsData};
use shared::catalog::{ToolQuery, categories_query, normalize};
use shared::models::Category;
use shared::ToolPage;

use crate::http::ApiTransport;
use crate::{ClientError, ClientResult};

/// Where catalog pages come from. The controller only knows this seam.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, query: &ToolQuery) -> ClientResult<ToolPage>;
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;
}

/// Production source: the gateway's GraphQL proxy
pub struct GraphqlCatalogSource<T: ApiTransport> {
    transport: Arc<T>,
}

impl<T: ApiTransport> GraphqlCatalogSource<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    async fn query<D: serde::de::DeserializeOwned>(
        &self,
        document: String,
    ) -> ClientResult<GraphqlEnvelope<D>> {
        let body = serde_json::json!({ "query": document });
        let value = self
            .transport
            .post_json("/api/graphql", &body)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Catalog request failed");
                ClientError::FetchFailed
            })?;
        let envelope: GraphqlEnvelope<D> = serde_json::from_value(value).map_err(|e| {
            tracing::warn!(error = %e, "Catalog response did not parse");
            ClientError::FetchFailed
        })?;
        if envelope.has_errors() {
            for err in &envelope.errors {
                tracing::warn!(message = %err.message, "Content backend reported an error");
            }
            return Err(ClientError::FetchFailed);
        }
        Ok(envelope)
    }
}

#[async_trait]
impl<T: ApiTransport> CatalogSource for GraphqlCatalogSource<T> {
    async fn fetch_page(&self, query: &ToolQuery) -> ClientResult<ToolPage> {
        let envelope: GraphqlEnvelope<PostsData> = self.query(query.build()).await?;
        let connection = envelope
            .data
            .and_then(|d| d.posts)
            .ok_or(ClientError::FetchFailed)?;
        Ok(normalize::tool_page(connection))
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        let envelope: GraphqlEnvelope<CategoriesData> = self.query(categories_query()).await?;
        let nodes = envelope
            .data
            .and_then(|d| d.categories)
            .map(|c| c.nodes)
            .unwrap_or_default();
        Ok(normalize::categories(nodes))
    }
}
