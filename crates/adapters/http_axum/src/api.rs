//! JSON REST API handler modules.
//!
//! Every resource kind shares the handlers in [`records`]; the kind is
//! selected at the type level through a [`Resource`] marker so each route
//! is wired to a monomorphised handler.

#[allow(clippy::missing_errors_doc)]
pub mod index;
#[allow(clippy::missing_errors_doc)]
pub mod records;

use axum::Router;
use axum::routing::get;

use hbnb_app::ports::Storage;
use hbnb_domain::kind::Kind;

use crate::state::AppState;

/// A REST resource backed by one record kind.
pub trait Resource: Send + Sync + 'static {
    const KIND: Kind;
}

macro_rules! define_resource {
    ($(#[doc = $doc:expr])* $name:ident => $kind:expr) => {
        $(#[doc = $doc])*
        pub struct $name;

        impl Resource for $name {
            const KIND: Kind = $kind;
        }
    };
}

define_resource!(
    /// `/states`
    States => Kind::State
);
define_resource!(
    /// `/cities`, nested under `/states/{id}`
    Cities => Kind::City
);
define_resource!(
    /// `/amenities`
    Amenities => Kind::Amenity
);
define_resource!(
    /// `/users`
    Users => Kind::User
);
define_resource!(
    /// `/places`, nested under `/cities/{id}`
    Places => Kind::Place
);
define_resource!(
    /// `/reviews`, nested under `/places/{id}`
    Reviews => Kind::Review
);

/// Build the `/api/v1` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: Storage + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(index::status))
        .route("/stats", get(index::stats::<S>))
        // States
        .route(
            "/states",
            get(records::list::<S, States>).post(records::create::<S, States>),
        )
        .route(
            "/states/{id}",
            get(records::get::<S, States>)
                .put(records::update::<S, States>)
                .delete(records::delete::<S, States>),
        )
        // Cities
        .route(
            "/states/{id}/cities",
            get(records::list_children::<S, Cities>).post(records::create_child::<S, Cities>),
        )
        .route(
            "/cities/{id}",
            get(records::get::<S, Cities>)
                .put(records::update::<S, Cities>)
                .delete(records::delete::<S, Cities>),
        )
        // Amenities
        .route(
            "/amenities",
            get(records::list::<S, Amenities>).post(records::create::<S, Amenities>),
        )
        .route(
            "/amenities/{id}",
            get(records::get::<S, Amenities>)
                .put(records::update::<S, Amenities>)
                .delete(records::delete::<S, Amenities>),
        )
        // Users
        .route(
            "/users",
            get(records::list::<S, Users>).post(records::create::<S, Users>),
        )
        .route(
            "/users/{id}",
            get(records::get::<S, Users>)
                .put(records::update::<S, Users>)
                .delete(records::delete::<S, Users>),
        )
        // Places
        .route(
            "/cities/{id}/places",
            get(records::list_children::<S, Places>).post(records::create_child::<S, Places>),
        )
        .route(
            "/places/{id}",
            get(records::get::<S, Places>)
                .put(records::update::<S, Places>)
                .delete(records::delete::<S, Places>),
        )
        // Reviews
        .route(
            "/places/{id}/reviews",
            get(records::list_children::<S, Reviews>).post(records::create_child::<S, Reviews>),
        )
        .route(
            "/reviews/{id}",
            get(records::get::<S, Reviews>)
                .put(records::update::<S, Reviews>)
                .delete(records::delete::<S, Reviews>),
        )
}
