//! Mapping of service failures onto HTTP responses

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Error body: `{"message": "...", "error": "..."}`; `message` is omitted
/// for lookups.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: String,
}

/// HTTP status for each failure kind.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::InvalidArgument(_) | DomainError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::DataAccessFailure(_) | DomainError::Unclassified(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// A failed request, rendered as JSON or, for unclassified faults, as the
/// bare message in plain text.
#[derive(Debug)]
pub struct ApiError {
    message: Option<String>,
    error: DomainError,
}

impl ApiError {
    pub fn new(error: DomainError) -> Self {
        Self {
            message: None,
            error,
        }
    }

    pub fn with_message(error: DomainError, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error,
        }
    }

    pub fn error(&self) -> &DomainError {
        &self.error
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.error);
        match self.error {
            DomainError::Unclassified(message) => plain_text(status, message),
            other => {
                let body = ErrorResponse {
                    message: self.message,
                    error: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

pub fn plain_text(status: StatusCode, message: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}
