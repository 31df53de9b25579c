//! Vertex AI model backend (REST, no SDK dependency)
//!
//! Calls `generateContent` on the configured model with the policy's
//! system instruction, a retrieval tool bound to the RAG corpus, and the
//! role-mapped conversation. The canonical `assistant` role becomes
//! `model` only here, at the upstream boundary.

use async_trait::async_trait;
use std::sync::Arc;

use shared::models::{ConversationMessage, Role};

use super::token::TokenProvider;
use super::{AssistantPolicy, BackendError, ModelBackend};
use crate::config::AssistantConfig;

pub struct VertexRagBackend {
    http: reqwest::Client,
    tokens: TokenProvider,
    endpoint: String,
    rag_corpus: String,
    policy: Arc<AssistantPolicy>,
}

impl VertexRagBackend {
    pub fn new(
        http: reqwest::Client,
        config: &AssistantConfig,
        policy: Arc<AssistantPolicy>,
    ) -> Self {
        Self {
            tokens: TokenProvider::new(http.clone(), config.credentials.clone()),
            endpoint: config.model_endpoint(),
            rag_corpus: config.rag_corpus.clone(),
            policy,
            http,
        }
    }

    fn request_body(&self, messages: &[ConversationMessage]) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        serde_json::json!({
            "systemInstruction": {
                "role": "system",
                "parts": [{ "text": self.policy.system_instruction }],
            },
            "contents": contents,
            "tools": [{
                "retrieval": {
                    "vertexRagStore": {
                        "ragResources": [{ "ragCorpus": self.rag_corpus }],
                    },
                },
            }],
            "safetySettings": [
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE" },
            ],
            "generationConfig": {
                "maxOutputTokens": self.policy.max_output_tokens,
                "temperature": self.policy.temperature,
                "topP": self.policy.top_p,
            },
        })
    }
}

#[async_trait]
impl ModelBackend for VertexRagBackend {
    async fn generate(&self, messages: &[ConversationMessage]) -> Result<String, BackendError> {
        let token = self.tokens.bearer().await?;
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&self.request_body(messages))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = response.json().await?;
        // Empty extraction is not an error; the endpoint substitutes the
        // fixed fallback reply.
        let text = value
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Ok(text)
    }
}
