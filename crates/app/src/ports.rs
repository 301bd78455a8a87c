//! Traits the application core needs from the outside world.
//!
//! Adapter crates implement them; the services only ever see the trait.

pub mod storage;

pub use storage::Storage;
