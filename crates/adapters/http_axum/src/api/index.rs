//! Service status and per-kind record counts.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use hbnb_app::ports::Storage;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /api/v1/status`.
#[derive(Serialize)]
pub struct Status {
    pub status: &'static str,
}

/// `GET /api/v1/status`, always `{"status": "OK"}`. Never touches storage.
pub async fn status() -> Json<Status> {
    Json(Status { status: "OK" })
}

/// `GET /api/v1/stats`: number of stored records keyed by table name.
pub async fn stats<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<BTreeMap<&'static str, u64>>, ApiError>
where
    S: Storage + Send + Sync + 'static,
{
    let counts = state
        .records
        .stats()
        .await?
        .into_iter()
        .map(|(kind, count)| (kind.table(), count))
        .collect();
    Ok(Json(counts))
}
