//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all REST endpoints. It
//! implements `axum::response::IntoResponse` to produce `{"detail", "code"}`
//! JSON bodies. Internal failures are logged here and replaced by a generic
//! detail so collaborator internals never reach the caller.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use nexus_core::CollaboratorError;

/// Detail returned for every internal error.
pub const INTERNAL_DETAIL: &str = "internal server error";

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    /// Human-readable explanation safe to show to the caller.
    pub detail: String,
    /// Machine-readable error code (e.g., "BAD_REQUEST").
    pub code: &'static str,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body could not be read (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A collaborator rejected the request content (422).
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) => ApiErrorBody {
                detail: msg,
                code: "BAD_REQUEST",
            },
            ApiError::ValidationFailed(msg) => ApiErrorBody {
                detail: msg,
                code: "VALIDATION_FAILED",
            },
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "request failed");
                ApiErrorBody {
                    detail: INTERNAL_DETAIL.to_string(),
                    code: "INTERNAL_ERROR",
                }
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CollaboratorError> for ApiError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Validation(msg) => ApiError::ValidationFailed(msg),
            CollaboratorError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_errors_hide_their_message() {
        let err: ApiError = CollaboratorError::internal("db password is hunter2").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["detail"], INTERNAL_DETAIL);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn validation_errors_keep_their_message() {
        let err: ApiError = CollaboratorError::validation("Time is required").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Time is required");
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }
}
