//! Assistant gateway internals
//!
//! The chat endpoint talks to a hosted generative model through the
//! [`ModelBackend`] seam. The concrete prompt/tool configuration is policy
//! data ([`AssistantPolicy`]), injected into whichever backend is active —
//! endpoint handlers never know which model service is behind it.

pub mod token;
pub mod vertex;

use async_trait::async_trait;
use thiserror::Error;

use shared::models::ConversationMessage;

pub use vertex::VertexRagBackend;

/// Fixed reply substituted when the model yields no extractable text
pub const FALLBACK_REPLY: &str = "Sorry, I could not process your question. Please try again.";

/// Model-backend error type
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token minting or exchange failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
}

/// A hosted generative model the gateway can relay conversations to.
///
/// Implementations receive the full, role-canonicalized conversation and
/// return the extracted text of the first candidate (possibly empty —
/// the caller substitutes [`FALLBACK_REPLY`]).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, messages: &[ConversationMessage]) -> Result<String, BackendError>;
}

/// Prompt and generation policy for the assistant.
///
/// The system instruction constrains the model to the bound retrieval
/// corpus, makes it decline when retrieval comes back empty, and fixes the
/// recommendation format (name + link + short description).
#[derive(Debug, Clone)]
pub struct AssistantPolicy {
    pub system_instruction: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for AssistantPolicy {
    fn default() -> Self {
        Self {
            system_instruction: "You are the tooldex assistant. Tool recommendations MUST be \
                based EXCLUSIVELY on the tooldex directory (the bound retrieval corpus). Never \
                invent tools, names or links. Whenever you recommend a tool, look it up in the \
                corpus and return:\n\n\
                Tool name\n\
                Description\n\
                The matching directory link\n\n\
                If nothing relevant is found in the corpus, reply: \"No matching tool found in \
                the tooldex directory.\" Before recommending, ask questions to understand the \
                user's real need. If necessary, confirm your understanding with a summary. \
                Example answer:\n\n\
                **Tool:** ChatGPT\n\
                **Description:** Conversational AI platform for text generation.\n\
                **Link:** https://tooldex.example/chatbots/chatgpt\n\n\
                Always use this format and always cite the directory link."
                .to_string(),
            max_output_tokens: 2048,
            temperature: 0.3,
            top_p: 0.95,
        }
    }
}
