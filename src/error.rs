use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single upstream read attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("service unavailable (503)")]
    ServiceUnavailable,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Request-level failure surfaced to the caller
#[derive(Debug, Error)]
pub enum AppError {
    #[error("critical source `{source_name}` unavailable after {attempts} attempts: {last_error}")]
    CriticalSource {
        source_name: String,
        attempts: u32,
        last_error: FetchError,
    },
    #[error("invalid filter `{field}`: {reason}")]
    InvalidFilter { field: &'static str, reason: String },
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error body: `{ error, details, timestamp }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
    pub timestamp: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::CriticalSource { .. } => StatusCode::BAD_GATEWAY,
            AppError::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            AppError::CriticalSource { .. } => "Failed to load sales data",
            AppError::InvalidFilter { .. } => "Invalid request parameters",
            AppError::Internal(_) => "Server Error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.summary().to_string(),
            details: self.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };
        (self.status(), Json(body)).into_response()
    }
}
