//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::issue::services::{IssueErrorKind, IssueLifecycleError};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// HTTP status code, repeated from the response line.
    pub code: u16,
}

/// Error returned by request handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Error for a request body that is not valid JSON for the endpoint.
    #[must_use]
    pub fn invalid_json() -> Self {
        Self::bad_request("invalid json")
    }

    /// Error for a path identifier that is not a number.
    #[must_use]
    pub fn invalid_id() -> Self {
        Self::bad_request("invalid id")
    }

    /// Error for a query string that cannot be decoded.
    #[must_use]
    pub fn invalid_query() -> Self {
        Self::bad_request("invalid query")
    }
}

impl From<IssueLifecycleError> for ApiError {
    fn from(err: IssueLifecycleError) -> Self {
        match err.kind() {
            IssueErrorKind::Validation | IssueErrorKind::InvalidState => {
                Self::bad_request(err.to_string())
            }
            IssueErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            IssueErrorKind::Internal => {
                error!(error = %err, "issue store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}
