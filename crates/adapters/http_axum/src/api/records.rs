//! JSON REST handlers shared by every record kind.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use hbnb_app::ports::Storage;
use hbnb_domain::record::Record;

use crate::api::Resource;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Record>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the endpoints returning a single record.
pub enum RecordResponse {
    Ok(Json<Record>),
    Created(Json<Record>),
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoints.
pub enum DeleteResponse {
    /// `200` with an empty JSON object.
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => Json(Map::<String, Value>::new()).into_response(),
        }
    }
}

/// `GET /api/v1/<resource>`
pub async fn list<S, R>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    let records = state.records.list(R::KIND).await?;
    Ok(ListResponse::Ok(Json(records)))
}

/// `GET /api/v1/<parent>/{id}/<resource>`
pub async fn list_children<S, R>(
    State(state): State<AppState<S>>,
    Path(parent_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    let records = state.records.list_children(R::KIND, &parent_id).await?;
    Ok(ListResponse::Ok(Json(records)))
}

/// `GET /api/v1/<resource>/{id}`
pub async fn get<S, R>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    let record = state.records.get(R::KIND, &id).await?;
    Ok(RecordResponse::Ok(Json(record)))
}

/// `POST /api/v1/<resource>`
pub async fn create<S, R>(
    State(state): State<AppState<S>>,
    JsonBody(body): JsonBody,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    let record = state.records.create(R::KIND, None, body).await?;
    Ok(RecordResponse::Created(Json(record)))
}

/// `POST /api/v1/<parent>/{id}/<resource>`
pub async fn create_child<S, R>(
    State(state): State<AppState<S>>,
    Path(parent_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    let record = state
        .records
        .create(R::KIND, Some(&parent_id), body)
        .await?;
    Ok(RecordResponse::Created(Json(record)))
}

/// `PUT /api/v1/<resource>/{id}`
pub async fn update<S, R>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    let record = state.records.update(R::KIND, &id, body).await?;
    Ok(RecordResponse::Ok(Json(record)))
}

/// `DELETE /api/v1/<resource>/{id}`
pub async fn delete<S, R>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + Send + Sync + 'static,
    R: Resource,
{
    state.records.delete(R::KIND, &id).await?;
    Ok(DeleteResponse::Ok)
}
