//! Content-backend proxy
//!
//! Pure passthrough: the `{ query, variables }` body is forwarded verbatim
//! to the configured GraphQL endpoint and the upstream status code and
//! JSON body come back unchanged. No validation, no transformation, no
//! caching. Only a transport failure is rewritten, into the generic
//! catalog error envelope.

use axum::body::Body;
use axum::extract::{Json, State};
use axum::response::Response;
use http::header::CONTENT_TYPE;

use shared::request::GraphqlProxyRequest;

use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;

pub async fn proxy(
    State(state): State<AppState>,
    Json(body): Json<GraphqlProxyRequest>,
) -> ServiceResult<Response> {
    let upstream = state
        .http
        .post(&state.cms_graphql_url)
        .json(&body)
        .send()
        .await
        .map_err(ServiceError::catalog)?;

    let status = upstream.status();
    let bytes = upstream.bytes().await.map_err(ServiceError::catalog)?;

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(bytes))
        .map_err(ServiceError::catalog)
}
