//! API error handling for the Cumulus HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::CumulusError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
    /// Numeric error id, mirroring the HTTP status code.
    pub id: u16,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create an unauthorized error (401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a conflict error (409).
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Create an internal server error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<CumulusError> for ApiError {
    fn from(err: CumulusError) -> Self {
        match err {
            CumulusError::Unauthenticated => Self::unauthorized("authentication required"),
            CumulusError::InvalidCredentials => Self::unauthorized("invalid login or password"),
            CumulusError::InvalidInput(msg) => Self::bad_request(msg),
            CumulusError::NotFound(what) => Self::not_found(format!("{what} not found")),
            CumulusError::Conflict(msg) => Self::conflict(msg),
            CumulusError::Storage(msg) => {
                tracing::error!("Storage failure: {}", msg);
                Self::internal("storage failure")
            }
            CumulusError::Inconsistency(msg) => {
                tracing::error!("Storage inconsistency: {}", msg);
                Self::internal("storage inconsistency")
            }
            CumulusError::Database(msg) => {
                tracing::error!("Database failure: {}", msg);
                Self::internal("internal error")
            }
            CumulusError::Io(e) => {
                tracing::error!("I/O failure: {}", e);
                Self::internal("internal error")
            }
            CumulusError::Config(msg) => {
                tracing::error!("Configuration failure: {}", msg);
                Self::internal("internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            id: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}
