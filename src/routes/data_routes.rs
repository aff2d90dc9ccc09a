use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::routes::required_str;
use crate::services::data_service;
use crate::state::app::AppState;
use crate::state::records::DataItem;

/// Build the data item routes under /api
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/data", get(list_items).post(create_item))
        .route("/data/:id", put(update_item).delete(delete_item))
        .with_state(state)
}

//
// ─────────────────────────────────────────────────────────────
// GET /api/data
// ─────────────────────────────────────────────────────────────
//
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<DataItem>>, ApiError> {
    tracing::info!("Received GET request for /api/data");

    let items = data_service::list(&state.data).await?;
    Ok(Json(items))
}

//
// ─────────────────────────────────────────────────────────────
// POST /api/data
// Create an item; the id is assigned here
// ─────────────────────────────────────────────────────────────
//
async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataItem>, ApiError> {
    let name = required_str(&body, "name").ok_or(ApiError::Validation("Name is required"))?;

    let item = data_service::create(&state.data, &state.ids, name).await?;
    Ok(Json(item))
}

//
// ─────────────────────────────────────────────────────────────
// PUT /api/data/{id}
// Rename the item(s) with this id, or 404
// ─────────────────────────────────────────────────────────────
//
async fn update_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataItem>, ApiError> {
    let name = required_str(&body, "name").ok_or(ApiError::Validation("Name is required"))?;

    match data_service::update(&state.data, parse_id(&id), name).await? {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound),
    }
}

//
// ─────────────────────────────────────────────────────────────
// DELETE /api/data/{id}
// Always answers "Item deleted", matched or not
// ─────────────────────────────────────────────────────────────
//
async fn delete_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    data_service::delete(&state.data, parse_id(&id)).await?;

    Ok(Json(json!({ "message": "Item deleted" })))
}

/// A non-numeric id becomes `None`, which matches no item.
fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
