//! # hbnb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **REST JSON API** under `/api/v1` (`/states`, `/cities`,
//!   `/amenities`, `/users`, `/places`, `/reviews`, `/status`, `/stats`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!   (`{"error": "..."}` with 400 or 404)
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the port trait and services) and `hbnb-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
