//! Prevention strategy API routes

use crate::error::ApiError;
use crate::services::{parse_id, StrategyService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sedentarism_shared::types::{
    PaginatedResponse, PublishedStrategiesResponse, StrategyListQuery, StrategyRequest,
    StrategyResponse,
};

pub fn strategy_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_strategy).get(list_strategies))
        .route("/published", get(published_strategies))
        .route(
            "/:id",
            get(get_strategy).put(update_strategy).delete(delete_strategy),
        )
}

/// POST /api/v1/strategies
async fn create_strategy(
    State(state): State<AppState>,
    Json(req): Json<StrategyRequest>,
) -> Result<(StatusCode, Json<StrategyResponse>), ApiError> {
    let strategy = StrategyService::create(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(strategy)))
}

/// GET /api/v1/strategies?strategy_type=&active=&search=
async fn list_strategies(
    State(state): State<AppState>,
    Query(query): Query<StrategyListQuery>,
) -> Result<Json<PaginatedResponse<StrategyResponse>>, ApiError> {
    let page = StrategyService::list(state.db(), query).await?;
    Ok(Json(page))
}

/// GET /api/v1/strategies/published - Active strategies grouped by type
async fn published_strategies(
    State(state): State<AppState>,
) -> Result<Json<PublishedStrategiesResponse>, ApiError> {
    let grouped = StrategyService::published(state.db()).await?;
    Ok(Json(grouped))
}

/// GET /api/v1/strategies/:id
async fn get_strategy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let id = parse_id(&id, "strategy")?;
    let strategy = StrategyService::get(state.db(), id).await?;
    Ok(Json(strategy))
}

/// PUT /api/v1/strategies/:id
async fn update_strategy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StrategyRequest>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let id = parse_id(&id, "strategy")?;
    let strategy = StrategyService::update(state.db(), id, req).await?;
    Ok(Json(strategy))
}

/// DELETE /api/v1/strategies/:id
async fn delete_strategy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id, "strategy")?;
    StrategyService::delete(state.db(), id).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}
