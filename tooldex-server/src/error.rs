//! Unified service-layer error type for tooldex-server
//!
//! `ServiceError` bridges the gap between upstream transport errors
//! (`reqwest::Error`, body/serde failures) and the API-layer error
//! (`AppError`). It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate,
//! while guaranteeing that upstream detail is logged server-side only and
//! the caller sees a generic failure message.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error — only two variants, keeps things simple.
///
/// - `Upstream`: transport/protocol failure against an external dependency
///   (auto-logged, mapped to the given generic code)
/// - `App`: business-rule error (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Upstream transport or protocol error
    Upstream { code: ErrorCode, source: BoxError },
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl ServiceError {
    /// Content-backend failure (proxy/catalog path)
    pub fn catalog(source: impl Into<BoxError>) -> Self {
        ServiceError::Upstream {
            code: ErrorCode::CatalogFetchFailed,
            source: source.into(),
        }
    }

    /// Model-service failure (assistant path)
    pub fn assistant(source: impl Into<BoxError>) -> Self {
        ServiceError::Upstream {
            code: ErrorCode::AssistantUpstreamError,
            source: source.into(),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Upstream { code, source } => {
                tracing::error!(error = %source, code = %code, "Upstream call failed");
                AppError::new(code)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_maps_to_generic_code() {
        let err = ServiceError::catalog("connection refused");
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::CatalogFetchFailed);
        // Internal detail is not leaked into the client message
        assert!(!app.message.contains("connection refused"));
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: ServiceError = AppError::validation("The message list is required").into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ValidationFailed);
        assert_eq!(app.message, "The message list is required");
    }
}
