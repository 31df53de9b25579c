//! Request types for the tooldex API
//!
//! The chat endpoint historically accepted two body shapes:
//! `{ messages: [...] }` (the current widget) and
//! `{ history: [...], message: "..." }` (an earlier revision). Both are
//! accepted and normalized into one canonical message list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::{ConversationMessage, Role};

/// One incoming chat turn, as sent by the browser.
///
/// `content` is lenient on purpose: non-string content is dropped during
/// normalization instead of failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Value,
}

impl IncomingMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Value::String(content.into()),
        }
    }
}

/// Chat request body (both accepted shapes)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Full conversation including the newest user turn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<IncomingMessage>,
    /// Legacy shape: prior turns ...
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<IncomingMessage>,
    /// ... plus the newest user message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatRequest {
    /// Wrap a full conversation in the current wire shape
    pub fn from_conversation(messages: &[ConversationMessage]) -> Self {
        Self {
            messages: messages
                .iter()
                .map(|m| IncomingMessage::new(m.role.as_str(), m.content.clone()))
                .collect(),
            history: Vec::new(),
            message: None,
        }
    }

    /// Normalize into the canonical message list.
    ///
    /// System-role entries and non-string content are dropped. Incoming
    /// `model` roles (an earlier revision's shape) canonicalize to
    /// `assistant`. An empty result is a validation error: the endpoint
    /// must never call upstream without a message.
    pub fn into_messages(self) -> Result<Vec<ConversationMessage>, AppError> {
        let mut incoming = if !self.messages.is_empty() {
            self.messages
        } else {
            self.history
        };
        if let Some(message) = self.message.filter(|m| !m.is_empty()) {
            incoming.push(IncomingMessage::new("user", message));
        }

        let messages: Vec<ConversationMessage> = incoming
            .into_iter()
            .filter_map(|m| {
                let role = match m.role.as_str() {
                    "user" => Role::User,
                    "assistant" | "model" => Role::Assistant,
                    _ => return None,
                };
                let content = m.content.as_str()?.to_string();
                Some(match role {
                    Role::User => ConversationMessage::user(content),
                    Role::Assistant => ConversationMessage::assistant(content),
                })
            })
            .collect();

        if messages.is_empty() {
            return Err(AppError::validation("The message list is required"));
        }
        Ok(messages)
    }
}

/// GraphQL proxy body, forwarded verbatim to the content backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlProxyRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

/// Recorded search interaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub session_id: String,
}

/// Recorded chat interaction (the whole message list, as sent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub session_id: String,
}
