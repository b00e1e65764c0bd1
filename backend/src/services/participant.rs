//! Participant registration and management

use super::parse_stored;
use crate::error::ApiError;
use crate::repositories::{
    ParticipantFilter, ParticipantInput, ParticipantRecord, ParticipantRepository,
};
use sedentarism_shared::types::{
    PaginatedResponse, ParticipantListQuery, ParticipantRequest, ParticipantResponse,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

const DUPLICATE_EMAIL: &str = "A participant with this email is already registered";

/// Participant service for business logic
pub struct ParticipantService;

impl ParticipantService {
    /// Register a new participant
    pub async fn create(
        pool: &PgPool,
        req: ParticipantRequest,
    ) -> Result<ParticipantResponse, ApiError> {
        let input = Self::validated_input(req)?;
        let record = ParticipantRepository::create(pool, input)
            .await
            .map_err(|e| ApiError::from_repository(e, DUPLICATE_EMAIL))?;

        info!(participant_id = %record.id, participant_type = %record.participant_type, "Participant registered");
        Self::to_response(record)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<ParticipantResponse, ApiError> {
        let record = ParticipantRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Participant not found".to_string()))?;

        Self::to_response(record)
    }

    /// Replace a participant's demographic fields
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: ParticipantRequest,
    ) -> Result<ParticipantResponse, ApiError> {
        let input = Self::validated_input(req)?;
        let record = ParticipantRepository::update(pool, id, input)
            .await
            .map_err(|e| ApiError::from_repository(e, DUPLICATE_EMAIL))?
            .ok_or_else(|| ApiError::NotFound("Participant not found".to_string()))?;

        Self::to_response(record)
    }

    /// Delete a participant with their questionnaire, health indicators and barriers
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = ParticipantRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Participant not found".to_string()));
        }

        info!(participant_id = %id, "Participant deleted");
        Ok(())
    }

    pub async fn list(
        pool: &PgPool,
        query: ParticipantListQuery,
    ) -> Result<PaginatedResponse<ParticipantResponse>, ApiError> {
        let query = query.normalize();
        let filter = ParticipantFilter {
            participant_type: query.participant_type.map(|t| t.as_str().to_string()),
            sex: query.sex.map(|s| s.as_str().to_string()),
            search: query.search,
        };

        let records = ParticipantRepository::list(pool, &filter, query.limit, query.offset)
            .await
            .map_err(ApiError::Internal)?;
        let total_count = ParticipantRepository::count(pool, &filter)
            .await
            .map_err(ApiError::Internal)?;

        let items = records
            .into_iter()
            .map(Self::to_response)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse::new(items, total_count, query.limit, query.offset))
    }

    /// Fail with 404 unless the participant exists
    pub async fn ensure_exists(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let exists = ParticipantRepository::exists(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if exists {
            Ok(())
        } else {
            Err(ApiError::NotFound("Participant not found".to_string()))
        }
    }

    /// Validate a request and normalize it for storage
    pub fn validated_input(req: ParticipantRequest) -> Result<ParticipantInput, ApiError> {
        req.validate()?;
        req.check()?;

        Ok(ParticipantInput {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            age: req.age as i32,
            sex: req.sex.as_str().to_string(),
            participant_type: req.participant_type.as_str().to_string(),
            course: non_blank(req.course),
            department: non_blank(req.department),
        })
    }

    fn to_response(record: ParticipantRecord) -> Result<ParticipantResponse, ApiError> {
        Ok(ParticipantResponse {
            id: record.id.to_string(),
            sex: parse_stored("sex", &record.sex)?,
            participant_type: parse_stored("participant_type", &record.participant_type)?,
            name: record.name,
            email: record.email,
            age: record.age.max(0) as u32,
            course: record.course,
            department: record.department,
            registered_at: record.registered_at,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
