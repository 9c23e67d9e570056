//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`clipfetch_core::Error`] so that route
//! handlers can return `Result<T, AppError>` directly. Bodies carry an
//! `error` summary and a `details` message, plus a machine-readable code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: clipfetch_core::Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: clipfetch_core::Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }
}

impl From<clipfetch_core::Error> for AppError {
    fn from(e: clipfetch_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let code = match &self.inner {
            clipfetch_core::Error::Validation(_) => "validation_error",
            clipfetch_core::Error::InvalidUrl { .. } => "invalid_url",
            clipfetch_core::Error::Tool { .. } => "tool_error",
            clipfetch_core::Error::Parse { .. } => "parse_error",
            clipfetch_core::Error::Provider { .. } => "provider_error",
            clipfetch_core::Error::AllProvidersFailed { .. } => "all_providers_failed",
            clipfetch_core::Error::Http(_) => "http_error",
            clipfetch_core::Error::Io { .. } => "io_error",
            clipfetch_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.summary(),
            "details": self.inner.to_string(),
            "code": code,
            "request_id": self.request_id,
        });

        (status, axum::Json(body)).into_response()
    }
}
