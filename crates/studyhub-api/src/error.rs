//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use studyhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
}

/// Error body for the transactional endpoints: carries the atomicity
/// marker regardless of outcome so callers know there are no partial
/// effects to reconcile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// Always true: the operation either fully applied or fully rolled
    /// back.
    pub transactional: bool,
}

/// Map an error kind to its HTTP status code.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::SessionUnavailable
        | ErrorKind::CommitFailed
        | ErrorKind::OperationFailed
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Newtype carrying an [`AppError`] across the handler boundary, where
/// it renders as a `{message}` body with the kind's status code.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        }

        let body = ApiErrorResponse {
            message: self.0.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Wrapper used by the transactional endpoints so their error responses
/// always include `transactional: true`.
#[derive(Debug)]
pub struct BulkError(pub AppError);

impl From<AppError> for BulkError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BulkError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Bulk operation failed");
        }

        let body = BulkErrorResponse {
            message: self.0.message,
            transactional: true,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn transactional_failures_map_to_500() {
        for kind in [
            ErrorKind::SessionUnavailable,
            ErrorKind::CommitFailed,
            ErrorKind::OperationFailed,
            ErrorKind::Database,
        ] {
            assert_eq!(status_for(kind), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn bulk_error_body_always_carries_transactional_flag() {
        let body = BulkErrorResponse {
            message: "Failed to move tasks: conflict".to_string(),
            transactional: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["transactional"], true);
        assert!(json["message"].as_str().unwrap().contains("move tasks"));
    }
}
