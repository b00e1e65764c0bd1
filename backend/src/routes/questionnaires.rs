//! Cross-participant questionnaire listing

use crate::error::ApiError;
use crate::services::QuestionnaireService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use sedentarism_shared::types::{PaginatedResponse, QuestionnaireListQuery, QuestionnaireResponse};

pub fn questionnaire_routes() -> Router<AppState> {
    Router::new().route("/", get(list_questionnaires))
}

/// GET /api/v1/questionnaires?activity_level=low
async fn list_questionnaires(
    State(state): State<AppState>,
    Query(query): Query<QuestionnaireListQuery>,
) -> Result<Json<PaginatedResponse<QuestionnaireResponse>>, ApiError> {
    let page = QuestionnaireService::list(state.db(), query).await?;
    Ok(Json(page))
}
