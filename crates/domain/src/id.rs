//! Record identifiers.
//!
//! Ids are random v4 UUIDs rendered in their lowercase hyphenated form,
//! which is also the only form accepted back from URLs and request bodies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a [`Record`](crate::record::Record) of any kind.
///
/// Unique across kinds, so a state and a city never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(raw).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn should_parse_its_own_display_form() {
        let id = RecordId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.parse::<RecordId>().unwrap(), id);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = RecordId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }

    #[test]
    fn should_reject_text_that_is_not_a_uuid() {
        assert!("bad_id".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());
    }

    #[test]
    fn should_display_wrapped_uuid_unchanged() {
        let uuid = Uuid::new_v4();
        assert_eq!(RecordId::from(uuid).to_string(), uuid.to_string());
    }
}
