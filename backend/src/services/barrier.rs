//! Barrier logging service

use super::{parse_stored, ParticipantService};
use crate::error::ApiError;
use crate::repositories::{BarrierRecord, BarrierRepository, CreateBarrier};
use sedentarism_shared::types::{
    BarrierListQuery, BarrierResponse, CreateBarrierRequest, PaginatedResponse,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct BarrierService;

impl BarrierService {
    /// Log a perceived barrier for a participant
    pub async fn create(
        pool: &PgPool,
        participant_id: Uuid,
        req: CreateBarrierRequest,
    ) -> Result<BarrierResponse, ApiError> {
        req.validate()?;
        req.check()?;
        ParticipantService::ensure_exists(pool, participant_id).await?;

        let input = CreateBarrier {
            participant_id,
            category: req.category.as_str().to_string(),
            description: req.description.trim().to_string(),
            intensity: req.intensity as i32,
        };

        let record = BarrierRepository::create(pool, input)
            .await
            .map_err(|e| ApiError::from_repository(e, "Barrier already logged"))?;

        info!(
            participant_id = %participant_id,
            category = %record.category,
            intensity = record.intensity,
            "Barrier logged"
        );

        Self::to_response(record)
    }

    pub async fn list_for_participant(
        pool: &PgPool,
        participant_id: Uuid,
    ) -> Result<Vec<BarrierResponse>, ApiError> {
        ParticipantService::ensure_exists(pool, participant_id).await?;

        BarrierRepository::list_for_participant(pool, participant_id)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(Self::to_response)
            .collect()
    }

    pub async fn list(
        pool: &PgPool,
        query: BarrierListQuery,
    ) -> Result<PaginatedResponse<BarrierResponse>, ApiError> {
        let query = query.normalize();
        let category = query.category.map(|c| c.as_str());
        let intensity = query.intensity.map(|i| i as i32);

        let records = BarrierRepository::list(pool, category, intensity, query.limit, query.offset)
            .await
            .map_err(ApiError::Internal)?;
        let total_count = BarrierRepository::count(pool, category, intensity)
            .await
            .map_err(ApiError::Internal)?;

        let items = records
            .into_iter()
            .map(Self::to_response)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse::new(items, total_count, query.limit, query.offset))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = BarrierRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if deleted {
            Ok(())
        } else {
            Err(ApiError::NotFound("Barrier not found".to_string()))
        }
    }

    fn to_response(record: BarrierRecord) -> Result<BarrierResponse, ApiError> {
        Ok(BarrierResponse {
            id: record.id.to_string(),
            participant_id: record.participant_id.to_string(),
            category: parse_stored("category", &record.category)?,
            description: record.description,
            intensity: record.intensity.max(0) as u32,
        })
    }
}
