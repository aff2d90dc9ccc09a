use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::routes::required_str;
use crate::services::visit_service;
use crate::state::app::AppState;
use crate::state::records::Visit;

/// Build the visit routes under /api
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/visits", get(list_visits).post(record_visit))
        .with_state(state)
}

//
// ─────────────────────────────────────────────────────────────
// GET /api/visits
// Every recorded visit
// ─────────────────────────────────────────────────────────────
//
async fn list_visits(State(state): State<AppState>) -> Result<Json<Vec<Visit>>, ApiError> {
    tracing::info!("Received GET request for /api/visits");

    let visits = visit_service::list(&state.visits).await?;
    Ok(Json(visits))
}

//
// ─────────────────────────────────────────────────────────────
// POST /api/visits
// Record a visit; echoes back { url }
// ─────────────────────────────────────────────────────────────
//
async fn record_visit(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let url = required_str(&body, "url").ok_or(ApiError::Validation("URL is required"))?;

    visit_service::record(&state.visits, &url).await?;
    Ok(Json(json!({ "url": url })))
}
