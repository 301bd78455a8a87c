//! Axum router assembly.

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use hbnb_app::ports::Storage;

use crate::state::AppState;

/// Build the top-level service.
///
/// Nests the API routes under `/api/v1`, answers unknown routes with a JSON
/// 404 and includes a [`TraceLayer`] that logs each HTTP request/response
/// at the `DEBUG` level. Trailing slashes are trimmed before routing, so
/// `/api/v1/states/` and `/api/v1/states` are the same route.
pub fn build<S>(state: AppState<S>) -> NormalizePath<Router>
where
    S: Storage + Send + Sync + 'static,
{
    let router = Router::new()
        .nest("/api/v1", crate::api::routes())
        .fallback(crate::error::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
