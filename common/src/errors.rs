//! Unified application error types.
//!
//! The diagnostic and assist endpoints deliberately absorb their own
//! failures into 200 responses with descriptive text; these types cover
//! the cases that remain actual HTTP errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ErrorEnvelope;

/// Result alias for fallible application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be parsed into the expected shape.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// Unexpected failure with no more specific classification.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code for client-side handling.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequestBody(_) => "INVALID_REQUEST_BODY",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorEnvelope::new(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
