//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, AppError>`; every catalog error becomes a JSON
//! body of the form `{ "error", "code", "request_id" }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reelshelf_common::Error;
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for the catalog error.
pub struct AppError {
    inner: Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }

    /// Message and code shown to the caller.
    ///
    /// Rejected segments read exactly like a missing entry of the same kind.
    /// Server-side failures never expose host paths.
    fn public_parts(&self) -> (String, &'static str) {
        match &self.inner {
            Error::NotFound { .. } => (self.inner.to_string(), "not_found"),
            Error::InvalidPath {
                entity, segment, ..
            } => (Error::not_found(entity.as_str(), segment).to_string(), "not_found"),
            Error::EmptyListing { .. } => (self.inner.to_string(), "empty_listing"),
            Error::Scan { .. } => ("Media library scan failed".to_string(), "scan_error"),
            Error::Internal(_) => ("Internal server error".to_string(), "internal_error"),
        }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
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
                "Server error in catalog handler"
            );
        } else if let Error::InvalidPath { .. } = &self.inner {
            tracing::warn!(error = %self.inner, "Rejected request path");
        }

        let (message, code) = self.public_parts();
        let body = json!({
            "error": message,
            "code": code,
            "request_id": self.request_id,
        });

        (status, axum::Json(body)).into_response()
    }
}
