//! Application state for tooldex-server
//!
//! Everything is built once at startup and cloned (cheaply) per request:
//! no per-request client construction, no ambient process mutation.

use std::sync::Arc;
use std::time::Duration;

use crate::analytics::AnalyticsLog;
use crate::assistant::{AssistantPolicy, ModelBackend, VertexRagBackend};
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for all upstream calls
    pub http: reqwest::Client,
    /// Content backend GraphQL endpoint (proxy target)
    pub cms_graphql_url: String,
    /// Model backend; `None` when the assistant is not configured
    pub assistant: Option<Arc<dyn ModelBackend>>,
    /// Append-only analytics sinks
    pub analytics: AnalyticsLog,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let assistant = config.assistant.as_ref().map(|assistant_config| {
            Arc::new(VertexRagBackend::new(
                http.clone(),
                assistant_config,
                Arc::new(AssistantPolicy::default()),
            )) as Arc<dyn ModelBackend>
        });

        let analytics = AnalyticsLog::new(&config.analytics_dir)?;

        Ok(Self {
            http,
            cms_graphql_url: config.cms_graphql_url.clone(),
            assistant,
            analytics,
        })
    }
}
