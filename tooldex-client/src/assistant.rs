//! Assistant widget state
//!
//! Conversation state behind the chat panel: an append-only message list
//! seeded with a greeting. Every send replays the full history through
//! the gateway; failures append a fixed apology instead of clearing
//! anything.

use std::sync::Arc;

use shared::models::ConversationMessage;
use shared::request::ChatRequest;
use shared::response::ChatReply;

use crate::http::ApiTransport;
use crate::ClientError;

/// Opening assistant message
pub const GREETING: &str = "Hi! I'm the tooldex assistant. Ask me about AI tools, \
    their features, or anything about artificial intelligence!";

/// Shown when the gateway cannot be reached or answers garbage
pub const ERROR_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Chat widget state over an [`ApiTransport`]
pub struct AssistantWidget<T: ApiTransport> {
    transport: Arc<T>,
    messages: Vec<ConversationMessage>,
}

impl<T: ApiTransport> AssistantWidget<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            messages: vec![ConversationMessage::assistant(GREETING)],
        }
    }

    /// The full conversation, oldest first
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Send a user message and append the assistant's reply.
    ///
    /// Blank input is ignored. The returned message is the appended
    /// assistant turn; on failure it carries the gateway's error text when
    /// one was provided, the fixed apology otherwise.
    pub async fn send(&mut self, text: &str) -> Option<ConversationMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ConversationMessage::user(text));

        let request = ChatRequest::from_conversation(&self.messages);
        let reply = match serde_json::to_value(&request) {
            Ok(body) => self.request_reply(&body).await,
            Err(err) => {
                tracing::warn!(error = %err, "Chat request did not serialize");
                ERROR_REPLY.to_string()
            }
        };

        let message = ConversationMessage::assistant(reply);
        self.messages.push(message.clone());
        Some(message)
    }

    async fn request_reply(&self, body: &serde_json::Value) -> String {
        match self.transport.post_json("/api/chat", body).await {
            Ok(value) => match serde_json::from_value::<ChatReply>(value) {
                Ok(reply) if !reply.response.is_empty() => reply.response,
                _ => ERROR_REPLY.to_string(),
            },
            // The gateway's own error text is user-facing (e.g. validation)
            Err(ClientError::Api { message, .. }) if !message.is_empty() => message,
            Err(err) => {
                tracing::warn!(error = %err, "Chat request failed");
                ERROR_REPLY.to_string()
            }
        }
    }
}
