//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway answered with an error envelope
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Catalog page request failed (transport error or backend error list).
    /// The page either fully succeeds or fully fails; there is no partial
    /// result to recover.
    #[error("Failed to fetch tools from the catalog backend")]
    FetchFailed,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
