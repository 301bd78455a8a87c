//! Failures rendered as `{"error": "<message>"}` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hbnb_domain::error::{HbnbError, ValidationError};

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    error: String,
}

impl ErrorBody {
    pub(crate) fn respond(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                error: message.into(),
            }),
        )
            .into_response()
    }
}

/// A service failure on its way out as an HTTP response.
///
/// Validation maps to `400`, missing records to `404` and storage
/// failures to an opaque `500`.
#[derive(Debug)]
pub struct ApiError(HbnbError);

impl From<HbnbError> for ApiError {
    fn from(err: HbnbError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HbnbError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HbnbError::NotFound(err) => {
                tracing::debug!(kind = %err.kind, id = %err.id, "record not found");
                (StatusCode::NOT_FOUND, err.to_string())
            }
            HbnbError::Storage(err) => {
                tracing::error!(error = ?err, "request failed in storage");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        ErrorBody::respond(status, message)
    }
}

/// Fallback for routes that match nothing.
pub(crate) async fn route_not_found() -> Response {
    ErrorBody::respond(StatusCode::NOT_FOUND, "Not found")
}
