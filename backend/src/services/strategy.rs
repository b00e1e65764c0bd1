//! Prevention strategy service

use super::parse_stored;
use crate::error::ApiError;
use crate::repositories::{StrategyFilter, StrategyInput, StrategyRecord, StrategyRepository};
use sedentarism_shared::models::StrategyType;
use sedentarism_shared::types::{
    PaginatedResponse, PublishedStrategiesResponse, StrategyListQuery, StrategyRequest,
    StrategyResponse,
};
use sedentarism_shared::validation::{check_field, validate_required_text};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct StrategyService;

impl StrategyService {
    pub async fn create(pool: &PgPool, req: StrategyRequest) -> Result<StrategyResponse, ApiError> {
        let input = Self::validated_input(req)?;
        let record = StrategyRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(strategy_id = %record.id, strategy_type = %record.strategy_type, "Strategy created");
        Self::to_response(record)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<StrategyResponse, ApiError> {
        let record = StrategyRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Strategy not found".to_string()))?;

        Self::to_response(record)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: StrategyRequest,
    ) -> Result<StrategyResponse, ApiError> {
        let input = Self::validated_input(req)?;
        let record = StrategyRepository::update(pool, id, input)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Strategy not found".to_string()))?;

        Self::to_response(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = StrategyRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if deleted {
            Ok(())
        } else {
            Err(ApiError::NotFound("Strategy not found".to_string()))
        }
    }

    pub async fn list(
        pool: &PgPool,
        query: StrategyListQuery,
    ) -> Result<PaginatedResponse<StrategyResponse>, ApiError> {
        let query = query.normalize();
        let filter = StrategyFilter {
            strategy_type: query.strategy_type.map(|t| t.as_str().to_string()),
            active: query.active,
            search: query.search,
        };

        let records = StrategyRepository::list(pool, &filter, query.limit, query.offset)
            .await
            .map_err(ApiError::Internal)?;
        let total_count = StrategyRepository::count(pool, &filter)
            .await
            .map_err(ApiError::Internal)?;

        let items = records
            .into_iter()
            .map(Self::to_response)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse::new(items, total_count, query.limit, query.offset))
    }

    /// Active strategies grouped by scope, each group newest first
    pub async fn published(pool: &PgPool) -> Result<PublishedStrategiesResponse, ApiError> {
        let strategies = StrategyRepository::list_active(pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(Self::to_response)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(group_by_type(strategies))
    }

    fn validated_input(req: StrategyRequest) -> Result<StrategyInput, ApiError> {
        req.validate()?;
        check_field("title", validate_required_text(&req.title, 200))?;

        Ok(StrategyInput {
            title: req.title.trim().to_string(),
            description: req.description,
            strategy_type: req.strategy_type.as_str().to_string(),
            target_audience: req.target_audience,
            required_resources: req.required_resources,
            implementation_timeline: req.implementation_timeline,
            owner: req.owner,
            active: req.active,
        })
    }

    pub(crate) fn to_response(record: StrategyRecord) -> Result<StrategyResponse, ApiError> {
        Ok(StrategyResponse {
            id: record.id.to_string(),
            strategy_type: parse_stored("strategy_type", &record.strategy_type)?,
            title: record.title,
            description: record.description,
            target_audience: record.target_audience,
            required_resources: record.required_resources,
            implementation_timeline: record.implementation_timeline,
            owner: record.owner,
            active: record.active,
            created_at: record.created_at,
        })
    }
}

/// Split strategies by type, keeping their relative order
fn group_by_type(strategies: Vec<StrategyResponse>) -> PublishedStrategiesResponse {
    let mut grouped = PublishedStrategiesResponse::default();
    for strategy in strategies {
        match strategy.strategy_type {
            StrategyType::Individual => grouped.individual.push(strategy),
            StrategyType::Institutional => grouped.institutional.push(strategy),
            StrategyType::Community => grouped.community.push(strategy),
        }
    }
    grouped
}
