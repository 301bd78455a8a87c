//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HbnbError`] via `#[from]`.

use crate::kind::Kind;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    /// The request payload was rejected before touching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An id or foreign key did not resolve to a stored record.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A request payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body is missing, is not `application/json`, or is not a JSON object.
    #[error("Not a JSON")]
    NotAJson,

    /// A required field is absent from the body.
    #[error("Missing {0}")]
    Missing(&'static str),
}

/// A record of the given kind could not be found.
///
/// Only the kind appears in the message; the id is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} not found")]
pub struct NotFoundError {
    pub kind: Kind,
    pub id: String,
}

impl NotFoundError {
    /// Build a not-found error for `kind` and whatever id the caller supplied.
    #[must_use]
    pub fn new(kind: Kind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_missing_field_message() {
        let err = HbnbError::from(ValidationError::Missing("name"));
        assert_eq!(err.to_string(), "Missing name");
    }

    #[test]
    fn should_format_not_a_json_message() {
        assert_eq!(ValidationError::NotAJson.to_string(), "Not a JSON");
    }

    #[test]
    fn should_hide_id_in_not_found_message() {
        let err = HbnbError::from(NotFoundError::new(Kind::City, "bad_id"));
        assert_eq!(err.to_string(), "City not found");
    }
}
