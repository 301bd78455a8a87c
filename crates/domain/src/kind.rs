//! Kind: the closed set of record categories and their table mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A record category with its own field schema and storage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    State,
    City,
    User,
    Place,
    Review,
    Amenity,
}

impl Kind {
    /// Every kind, in the order stats are computed.
    pub const ALL: [Kind; 6] = [
        Kind::State,
        Kind::User,
        Kind::Amenity,
        Kind::City,
        Kind::Place,
        Kind::Review,
    ];

    /// Name of the storage table backing this kind.
    ///
    /// Also used as the key of this kind in the stats document.
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Self::State => "states",
            Self::City => "cities",
            Self::User => "users",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::Amenity => "amenities",
        }
    }

    /// Class name, as rendered in `__class__` and error messages.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::City => "City",
            Self::User => "User",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::Amenity => "Amenity",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Returned when a string names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == s || kind.table() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
