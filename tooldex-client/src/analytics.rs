//! Client-side analytics reporting
//!
//! Fire-and-forget: events carry a per-widget session id and a timestamp,
//! and reporting failures are logged and swallowed — analytics must never
//! affect the user-facing flow.

use std::sync::Arc;

use shared::models::ConversationMessage;
use shared::request::{ChatEvent, IncomingMessage, SearchEvent};
use shared::util::now_rfc3339;

use crate::http::ApiTransport;

/// Posts search/chat events to the gateway's analytics endpoints
pub struct AnalyticsReporter<T: ApiTransport> {
    transport: Arc<T>,
    session_id: String,
}

impl<T: ApiTransport> AnalyticsReporter<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            session_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record a search the user performed
    pub async fn report_search(&self, search_term: &str) {
        let event = SearchEvent {
            search_term: search_term.to_string(),
            timestamp: now_rfc3339(),
            session_id: self.session_id.clone(),
        };
        self.post("/api/analytics/search", serde_json::to_value(&event)).await;
    }

    /// Record a chat exchange (the whole conversation, as sent)
    pub async fn report_chat(&self, messages: &[ConversationMessage]) {
        let event = ChatEvent {
            messages: messages
                .iter()
                .map(|m| IncomingMessage::new(m.role.as_str(), m.content.clone()))
                .collect(),
            timestamp: now_rfc3339(),
            session_id: self.session_id.clone(),
        };
        self.post("/api/analytics/chat", serde_json::to_value(&event)).await;
    }

    async fn post(&self, path: &str, body: serde_json::Result<serde_json::Value>) {
        let body = match body {
            Ok(b) => b,
            Err(err) => {
                tracing::warn!(error = %err, "Analytics event did not serialize");
                return;
            }
        };
        if let Err(err) = self.transport.post_json(path, &body).await {
            tracing::warn!(error = %err, path, "Analytics report failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::{ClientError, ClientResult};

    struct RecordingTransport {
        posts: Mutex<Vec<(String, serde_json::Value)>>,
        fail: bool,
    }

    #[async_trait]
    impl ApiTransport for RecordingTransport {
        async fn post_json(
            &self,
            path: &str,
            body: &serde_json::Value,
        ) -> ClientResult<serde_json::Value> {
            self.posts
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            if self.fail {
                Err(ClientError::FetchFailed)
            } else {
                Ok(serde_json::json!({"ok": true}))
            }
        }
    }

    fn transport(fail: bool) -> Arc<RecordingTransport> {
        Arc::new(RecordingTransport {
            posts: Mutex::new(Vec::new()),
            fail,
        })
    }

    #[tokio::test]
    async fn test_search_event_shape() {
        let transport = transport(false);
        let reporter = AnalyticsReporter::new(transport.clone());

        reporter.report_search("chatgpt").await;

        let posts = transport.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "/api/analytics/search");
        assert_eq!(posts[0].1["searchTerm"], "chatgpt");
        assert_eq!(posts[0].1["sessionId"], reporter.session_id());
        assert!(posts[0].1["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chat_event_carries_messages() {
        let transport = transport(false);
        let reporter = AnalyticsReporter::new(transport.clone());

        reporter
            .report_chat(&[
                ConversationMessage::user("hi"),
                ConversationMessage::assistant("hello"),
            ])
            .await;

        let posts = transport.posts.lock().unwrap();
        assert_eq!(posts[0].0, "/api/analytics/chat");
        let messages = posts[0].1["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
    }

    #[tokio::test]
    async fn test_report_failures_are_swallowed() {
        let transport = transport(true);
        let reporter = AnalyticsReporter::new(transport.clone());

        // Must not panic or error
        reporter.report_search("anything").await;
        assert_eq!(transport.posts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_session_id_is_stable_per_reporter() {
        let transport = transport(false);
        let reporter = AnalyticsReporter::new(transport.clone());

        reporter.report_search("a").await;
        reporter.report_search("b").await;

        let posts = transport.posts.lock().unwrap();
        assert_eq!(posts[0].1["sessionId"], posts[1].1["sessionId"]);
    }
}
