//! Request body extraction.
//!
//! axum's own `Json` extractor answers malformed bodies with plain-text
//! rejections; the API must instead answer `{"error": "Not a JSON"}`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use hbnb_domain::error::ValidationError;

use crate::error::ApiError;

/// A request body that declared itself as JSON and parsed as JSON.
///
/// Whether it is an *object* is left to the service.
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ValidationError::NotAJson.into());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::NotAJson)?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|_| ValidationError::NotAJson.into())
    }
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(mime) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };

    let mime = mime.trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
