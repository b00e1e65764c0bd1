//! Barrier API routes

use crate::error::ApiError;
use crate::services::{parse_id, BarrierService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use sedentarism_shared::types::{BarrierListQuery, BarrierResponse, PaginatedResponse};

pub fn barrier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_barriers))
        .route("/:id", delete(delete_barrier))
}

/// GET /api/v1/barriers?category=time&intensity=4
async fn list_barriers(
    State(state): State<AppState>,
    Query(query): Query<BarrierListQuery>,
) -> Result<Json<PaginatedResponse<BarrierResponse>>, ApiError> {
    let page = BarrierService::list(state.db(), query).await?;
    Ok(Json(page))
}

/// DELETE /api/v1/barriers/:id
async fn delete_barrier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id, "barrier")?;
    BarrierService::delete(state.db(), id).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}
