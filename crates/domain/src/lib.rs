//! # hbnb-domain
//!
//! Pure domain model for the hbnb listing API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Kinds** (State, City, User, Place, Review, Amenity) and their
//!   table mapping
//! - Define **Records** (one stored object of any kind, with free-form attributes)
//! - Declare each kind's **Schema**: required fields, immutable fields,
//!   parent link and foreign-key references
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod kind;
pub mod record;
pub mod schema;
