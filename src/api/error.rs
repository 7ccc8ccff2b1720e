//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes. Every failure kind
//! degrades to "operation not applied, message shown" - nothing propagates
//! as an unhandled failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::collab::CollaboratorError;
use crate::journal::JournalError;
use crate::store::StoreError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed before reaching the journal
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Journal rejected the operation
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// An external collaborator failed; the action may be retried
    #[error("Upstream error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// A configured dependency is not available
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Journal(e) => match e {
                JournalError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                JournalError::LogFull { .. } | JournalError::DayFull { .. } => {
                    (StatusCode::CONFLICT, "CAPACITY_EXCEEDED")
                }
                JournalError::EntryNotFound(_) | JournalError::WaterEntryNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND")
                }
                JournalError::Store(StoreError::QuotaExceeded { .. }) => {
                    (StatusCode::INSUFFICIENT_STORAGE, "STORAGE_FULL")
                }
                JournalError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            ApiError::Collaborator(e) => match e {
                CollaboratorError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
                CollaboratorError::Unavailable => {
                    (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE")
                }
                _ => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            },
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidationError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Journal(JournalError::LogFull { max: 100 })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Journal(JournalError::Validation(
                ValidationError::BadFrequency
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Journal(JournalError::Store(
                StoreError::QuotaExceeded {
                    key: "calorie_log".into(),
                    size: 10,
                    limit: 1,
                }
            ))),
            StatusCode::INSUFFICIENT_STORAGE
        );
        assert_eq!(
            status_of(ApiError::Collaborator(CollaboratorError::Timeout)),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
