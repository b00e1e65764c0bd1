//! Statistics API routes

use crate::error::ApiError;
use crate::services::StatisticsService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use sedentarism_shared::types::{ResultsResponse, SummaryResponse};

pub fn statistics_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/results", get(results))
}

/// GET /api/v1/statistics/summary - Dashboard summary
async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = StatisticsService::summary(state.db(), &state.config().statistics).await?;
    Ok(Json(summary))
}

/// GET /api/v1/statistics/results - Study results
async fn results(State(state): State<AppState>) -> Result<Json<ResultsResponse>, ApiError> {
    let results = StatisticsService::results(state.db()).await?;
    Ok(Json(results))
}
