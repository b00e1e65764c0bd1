//! Participant API routes
//!
//! Per-participant questionnaire, health indicator and barrier endpoints
//! are nested under `/participants/:id`.

use crate::error::ApiError;
use crate::services::{
    parse_id, BarrierService, HealthIndicatorService, ParticipantService, QuestionnaireService,
};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use sedentarism_shared::types::{
    BarrierResponse, CreateBarrierRequest, HealthIndicatorsResponse, PaginatedResponse,
    ParticipantListQuery, ParticipantRequest, ParticipantResponse, QuestionnaireResponse,
    SubmitHealthIndicatorsRequest, SubmitQuestionnaireRequest,
};

/// Create participant routes
pub fn participant_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_participant).get(list_participants))
        .route(
            "/:id",
            get(get_participant)
                .put(update_participant)
                .delete(delete_participant),
        )
        .route(
            "/:id/questionnaire",
            put(submit_questionnaire).get(get_questionnaire),
        )
        .route(
            "/:id/health-indicators",
            put(submit_health_indicators).get(get_health_indicators),
        )
        .route("/:id/barriers", post(create_barrier).get(list_participant_barriers))
}

/// POST /api/v1/participants - Register a participant
async fn create_participant(
    State(state): State<AppState>,
    Json(req): Json<ParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), ApiError> {
    let participant = ParticipantService::create(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// GET /api/v1/participants - List participants with filters and pagination
async fn list_participants(
    State(state): State<AppState>,
    Query(query): Query<ParticipantListQuery>,
) -> Result<Json<PaginatedResponse<ParticipantResponse>>, ApiError> {
    let page = ParticipantService::list(state.db(), query).await?;
    Ok(Json(page))
}

/// GET /api/v1/participants/:id
async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ParticipantResponse>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let participant = ParticipantService::get(state.db(), id).await?;
    Ok(Json(participant))
}

/// PUT /api/v1/participants/:id - Replace demographic fields
async fn update_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ParticipantRequest>,
) -> Result<Json<ParticipantResponse>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let participant = ParticipantService::update(state.db(), id, req).await?;
    Ok(Json(participant))
}

/// DELETE /api/v1/participants/:id - Delete a participant and their records
async fn delete_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id, "participant")?;
    ParticipantService::delete(state.db(), id).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}

/// PUT /api/v1/participants/:id/questionnaire - Submit or re-submit the IPAQ
async fn submit_questionnaire(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitQuestionnaireRequest>,
) -> Result<Json<QuestionnaireResponse>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let questionnaire = QuestionnaireService::submit(state.db(), id, req).await?;
    Ok(Json(questionnaire))
}

/// GET /api/v1/participants/:id/questionnaire
async fn get_questionnaire(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionnaireResponse>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let questionnaire = QuestionnaireService::get(state.db(), id).await?;
    Ok(Json(questionnaire))
}

/// PUT /api/v1/participants/:id/health-indicators
async fn submit_health_indicators(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitHealthIndicatorsRequest>,
) -> Result<Json<HealthIndicatorsResponse>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let indicators = HealthIndicatorService::submit(state.db(), id, req).await?;
    Ok(Json(indicators))
}

/// GET /api/v1/participants/:id/health-indicators
async fn get_health_indicators(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HealthIndicatorsResponse>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let indicators = HealthIndicatorService::get(state.db(), id).await?;
    Ok(Json(indicators))
}

/// POST /api/v1/participants/:id/barriers - Log a perceived barrier
async fn create_barrier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateBarrierRequest>,
) -> Result<(StatusCode, Json<BarrierResponse>), ApiError> {
    let id = parse_id(&id, "participant")?;
    let barrier = BarrierService::create(state.db(), id, req).await?;
    Ok((StatusCode::CREATED, Json(barrier)))
}

/// GET /api/v1/participants/:id/barriers
async fn list_participant_barriers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<BarrierResponse>>, ApiError> {
    let id = parse_id(&id, "participant")?;
    let barriers = BarrierService::list_for_participant(state.db(), id).await?;
    Ok(Json(barriers))
}
