//! HTTP transport for the same-origin gateway API

use async_trait::async_trait;
use reqwest::Client;

use crate::{ClientError, ClientResult};

/// Error envelope returned by the gateway on failure
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Transport seam: everything the client library sends is a JSON POST to
/// a same-origin path. Mocked in tests, HTTP in production.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> ClientResult<serde_json::Value>;
}

/// Network transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<serde_json::Value> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error.or(e.message))
                .unwrap_or(text);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> ClientResult<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self.client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }
}
