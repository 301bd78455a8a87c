//! # hbnb-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **`Storage` port** that persistence adapters implement:
//!   `get`, `all`, `find_by`, `count` and `save(changes)`, each keyed
//!   by a record `Kind`
//! - Define the **`RecordService`** use-case: list, get, create, update,
//!   delete and stats, generic over every kind
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `hbnb-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
