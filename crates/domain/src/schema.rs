//! Per-kind field declarations: what creation requires, what updates may
//! not touch, and which fields point at other records.

use crate::kind::Kind;

/// Fields the system manages for every kind. Never writable by clients.
pub const SYSTEM_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

/// A link from a child kind to the parent it is nested under in the API
/// (e.g. a Place lives under a City).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent {
    pub kind: Kind,
    /// Attribute on the child holding the parent's id.
    pub field: &'static str,
}

/// A body field that must name an existing record at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub kind: Kind,
}

/// Static field schema of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub kind: Kind,
    /// Checked in this order on creation; the first absent one is reported.
    pub required: &'static [&'static str],
    /// Kind-specific immutable fields, on top of [`SYSTEM_FIELDS`].
    pub protected: &'static [&'static str],
    pub parent: Option<Parent>,
    pub references: &'static [Reference],
}

impl Schema {
    /// Whether `field` may be set by a client on update.
    #[must_use]
    pub fn is_protected(&self, field: &str) -> bool {
        SYSTEM_FIELDS.contains(&field) || self.protected.contains(&field)
    }
}

const USER_REF: Reference = Reference {
    field: "user_id",
    kind: Kind::User,
};

impl Kind {
    /// The field schema of this kind.
    #[must_use]
    pub fn schema(self) -> Schema {
        match self {
            Self::State => Schema {
                kind: self,
                required: &["name"],
                protected: &[],
                parent: None,
                references: &[],
            },
            Self::City => Schema {
                kind: self,
                required: &["name"],
                protected: &["state_id"],
                parent: Some(Parent {
                    kind: Self::State,
                    field: "state_id",
                }),
                references: &[],
            },
            Self::User => Schema {
                kind: self,
                required: &["email", "password"],
                protected: &["email"],
                parent: None,
                references: &[],
            },
            Self::Place => Schema {
                kind: self,
                required: &["user_id", "name"],
                protected: &["user_id", "city_id"],
                parent: Some(Parent {
                    kind: Self::City,
                    field: "city_id",
                }),
                references: &[USER_REF],
            },
            Self::Review => Schema {
                kind: self,
                required: &["user_id", "text"],
                protected: &["user_id", "place_id"],
                parent: Some(Parent {
                    kind: Self::Place,
                    field: "place_id",
                }),
                references: &[USER_REF],
            },
            Self::Amenity => Schema {
                kind: self,
                required: &["name"],
                protected: &[],
                parent: None,
                references: &[],
            },
        }
    }
}
