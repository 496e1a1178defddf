use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::{ListRecord, ListStore, NewList};
use crate::error::ApiError;
use crate::middleware::{ApiResult, AuthUser, ListResponse};

/// Request body wrapper: `{ "list": { ... } }`
#[derive(Debug, Deserialize)]
pub struct ListPayload {
    pub list: Value,
}

/// POST /lists - create a list owned by the caller
pub async fn create(
    State(store): State<Arc<dyn ListStore>>,
    auth: AuthUser,
    payload: Result<Json<ListPayload>, JsonRejection>,
) -> ApiResult<ListResponse> {
    let Json(payload) = payload?;
    let mut fields = into_attributes(payload.list)?;

    // The owner is always the authenticated caller
    fields.remove("owner");

    let list = store.create(NewList::new(auth.user_id, fields)).await?;
    debug!("User {} created list {}", auth.user_id, list.id);

    Ok(ListResponse::created(list.to_value()))
}

/// GET /lists - every list, no authentication required
pub async fn index(State(store): State<Arc<dyn ListStore>>) -> ApiResult<ListResponse> {
    let lists = store.find_all().await?;
    let data: Vec<Value> = lists.iter().map(ListRecord::to_value).collect();

    Ok(ListResponse::ok(Value::Array(data)))
}

/// GET /lists/:id - a single list, no authentication required
pub async fn show(State(store): State<Arc<dyn ListStore>>, Path(id): Path<String>) -> ApiResult<ListResponse> {
    let id = parse_list_id(&id)?;
    let list = find_or_404(store.as_ref(), id).await?;

    Ok(ListResponse::ok(list.to_value()))
}

/// PATCH /lists/:id - merge non-blank fields into a list the caller owns
pub async fn update(
    State(store): State<Arc<dyn ListStore>>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ListPayload>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_list_id(&id)?;
    let list = find_or_404(store.as_ref(), id).await?;
    require_ownership(&auth, &list)?;

    let Json(payload) = payload?;
    let changes = sanitize_update(into_attributes(payload.list)?);

    if changes.is_empty() {
        debug!("Update of list {} carried no changes", id);
        return Ok(StatusCode::NO_CONTENT);
    }

    store.update(id, changes).await?;
    debug!("User {} updated list {}", auth.user_id, id);

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /lists/:id - permanently remove a list the caller owns
pub async fn destroy(
    State(store): State<Arc<dyn ListStore>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_list_id(&id)?;
    let list = find_or_404(store.as_ref(), id).await?;
    require_ownership(&auth, &list)?;

    store.delete(id).await?;
    debug!("User {} deleted list {}", auth.user_id, id);

    Ok(StatusCode::NO_CONTENT)
}

/// Remove the `owner` key and every blank value from an update payload.
///
/// Blank means `null` or a string that is empty after trimming.
pub fn sanitize_update(mut changes: Map<String, Value>) -> Map<String, Value> {
    changes.remove("owner");
    changes.retain(|_, value| !is_blank(value));
    changes
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn into_attributes(list: Value) -> Result<Map<String, Value>, ApiError> {
    match list {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_params("`list` must be a JSON object")),
    }
}

fn parse_list_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_params(format!("Invalid list id: {}", raw)))
}

async fn find_or_404(store: &dyn ListStore, id: Uuid) -> Result<ListRecord, ApiError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("List {} not found", id)))
}

fn require_ownership(auth: &AuthUser, list: &ListRecord) -> Result<(), ApiError> {
    if list.is_owned_by(auth.user_id) {
        return Ok(());
    }
    warn!("User {} attempted to modify list {} owned by {}", auth.user_id, list.id, list.owner);
    Err(ApiError::forbidden("You are not the owner of this list"))
}
