//! API error types with IntoResponse
//!
//! Client errors become `{"error": {"timestamp", "message", "path"}}` with
//! status 400. Upstream and internal failures are logged and answered with
//! a bare 502/500.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::DbError;
use crate::error::ErrorKind;
use crate::lookup::LookupError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request input rejected before touching the store (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store outcome, 400 or 500 depending on kind
    #[error(transparent)]
    Database(#[from] DbError),

    /// Enrichment call failure, 502 or 500 depending on kind
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(e) => e.kind(),
            Self::Database(e) => e.kind(),
            Self::Lookup(e) => e.kind(),
        }
    }
}

/// Error body envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub path: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                timestamp: Utc::now(),
                message: message.into(),
                path: path.into(),
            },
        }
    }
}

/// Client-facing error message, carried in response extensions until
/// [`attach_error_path`] renders it with the request path.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status();

        match kind {
            ErrorKind::Internal => {
                // Log the actual error, return a bare status
                tracing::error!(error = %self, "internal error");
                return status.into_response();
            }
            ErrorKind::UpstreamUnavailable => {
                tracing::warn!(error = %self, "song info service unavailable");
                return status.into_response();
            }
            _ => {}
        }

        let report = ErrorReport {
            kind,
            message: self.to_string(),
        };
        tracing::debug!(kind = %kind, message = %report.message, "client error");

        let mut response = (status, Json(ErrorBody::new(report.message.clone(), ""))).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Middleware that fills the request path into client error bodies.
pub async fn attach_error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => {
            let status = response.status();
            (status, Json(ErrorBody::new(report.message, path))).into_response()
        }
        None => response,
    }
}
