//! IPAQ questionnaire service
//!
//! Every submission is scored from scratch with the shared scoring core
//! before it is written, so a stored level never disagrees with its answers.

use super::{decimal_to_f64, parse_stored, ParticipantService};
use crate::error::ApiError;
use crate::repositories::{QuestionnaireRecord, QuestionnaireRepository};
use sedentarism_shared::ipaq::{met_breakdown, ScoredQuestionnaire};
use sedentarism_shared::types::{
    PaginatedResponse, QuestionnaireListQuery, QuestionnaireResponse, SubmitQuestionnaireRequest,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Questionnaire service for business logic
pub struct QuestionnaireService;

impl QuestionnaireService {
    /// Submit or re-submit a participant's questionnaire
    pub async fn submit(
        pool: &PgPool,
        participant_id: Uuid,
        req: SubmitQuestionnaireRequest,
    ) -> Result<QuestionnaireResponse, ApiError> {
        let scored = Self::score_request(req)?;
        ParticipantService::ensure_exists(pool, participant_id).await?;

        let record = QuestionnaireRepository::upsert(pool, participant_id, &scored)
            .await
            .map_err(|e| ApiError::from_repository(e, "Questionnaire already submitted"))?;

        info!(
            participant_id = %participant_id,
            total_met = scored.total_met(),
            activity_level = %scored.activity_level(),
            "Questionnaire scored"
        );

        Self::to_response(record)
    }

    /// Validate answers and derive the score
    pub fn score_request(req: SubmitQuestionnaireRequest) -> Result<ScoredQuestionnaire, ApiError> {
        req.check()?;
        Ok(ScoredQuestionnaire::recompute(req.into()))
    }

    pub async fn get(pool: &PgPool, participant_id: Uuid) -> Result<QuestionnaireResponse, ApiError> {
        let record = QuestionnaireRepository::find_by_participant(pool, participant_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Questionnaire not found".to_string()))?;

        Self::to_response(record)
    }

    pub async fn list(
        pool: &PgPool,
        query: QuestionnaireListQuery,
    ) -> Result<PaginatedResponse<QuestionnaireResponse>, ApiError> {
        let query = query.normalize();
        let level = query.activity_level.map(|l| l.as_str());

        let records = QuestionnaireRepository::list(pool, level, query.limit, query.offset)
            .await
            .map_err(ApiError::Internal)?;
        let total_count = QuestionnaireRepository::count(pool, level)
            .await
            .map_err(ApiError::Internal)?;

        let items = records
            .into_iter()
            .map(Self::to_response)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse::new(items, total_count, query.limit, query.offset))
    }

    fn to_response(record: QuestionnaireRecord) -> Result<QuestionnaireResponse, ApiError> {
        let count = |v: i32| v.max(0) as u32;
        let breakdown = met_breakdown(
            count(record.vigorous_days),
            count(record.vigorous_minutes),
            count(record.moderate_days),
            count(record.moderate_minutes),
            count(record.walking_days),
            count(record.walking_minutes),
        );

        Ok(QuestionnaireResponse {
            id: record.id.to_string(),
            participant_id: record.participant_id.to_string(),
            vigorous_days: count(record.vigorous_days),
            vigorous_minutes: count(record.vigorous_minutes),
            moderate_days: count(record.moderate_days),
            moderate_minutes: count(record.moderate_minutes),
            walking_days: count(record.walking_days),
            walking_minutes: count(record.walking_minutes),
            sitting_hours_weekday: decimal_to_f64(&record.sitting_hours_weekday),
            sitting_hours_weekend: decimal_to_f64(&record.sitting_hours_weekend),
            total_met: decimal_to_f64(&record.met_total),
            activity_level: parse_stored("activity_level", &record.activity_level)?,
            breakdown,
            completed_at: record.completed_at,
        })
    }
}
