//! Prevention strategy repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Strategy record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StrategyRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub strategy_type: String,
    pub target_audience: String,
    pub required_resources: String,
    pub implementation_timeline: String,
    pub owner: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or replacing a strategy
#[derive(Debug, Clone)]
pub struct StrategyInput {
    pub title: String,
    pub description: String,
    pub strategy_type: String,
    pub target_audience: String,
    pub required_resources: String,
    pub implementation_timeline: String,
    pub owner: String,
    pub active: bool,
}

/// Strategy list filters
#[derive(Debug, Clone, Default)]
pub struct StrategyFilter {
    pub strategy_type: Option<String>,
    pub active: Option<bool>,
    pub search: Option<String>,
}

impl StrategyFilter {
    fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| format!("%{}%", s.trim()))
    }
}

/// Strategy repository for database operations
pub struct StrategyRepository;

impl StrategyRepository {
    pub async fn create(pool: &PgPool, input: StrategyInput) -> Result<StrategyRecord> {
        let record = sqlx::query_as::<_, StrategyRecord>(
            r#"
            INSERT INTO prevention_strategies
                (title, description, strategy_type, target_audience, required_resources,
                 implementation_timeline, owner, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, strategy_type, target_audience, required_resources,
                      implementation_timeline, owner, active, created_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.strategy_type)
        .bind(&input.target_audience)
        .bind(&input.required_resources)
        .bind(&input.implementation_timeline)
        .bind(&input.owner)
        .bind(input.active)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<StrategyRecord>> {
        let record = sqlx::query_as::<_, StrategyRecord>(
            r#"
            SELECT id, title, description, strategy_type, target_audience, required_resources,
                   implementation_timeline, owner, active, created_at
            FROM prevention_strategies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: StrategyInput,
    ) -> Result<Option<StrategyRecord>> {
        let record = sqlx::query_as::<_, StrategyRecord>(
            r#"
            UPDATE prevention_strategies
            SET title = $2, description = $3, strategy_type = $4, target_audience = $5,
                required_resources = $6, implementation_timeline = $7, owner = $8, active = $9
            WHERE id = $1
            RETURNING id, title, description, strategy_type, target_audience, required_resources,
                      implementation_timeline, owner, active, created_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.strategy_type)
        .bind(&input.target_audience)
        .bind(&input.required_resources)
        .bind(&input.implementation_timeline)
        .bind(&input.owner)
        .bind(input.active)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM prevention_strategies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List strategies, newest first
    pub async fn list(
        pool: &PgPool,
        filter: &StrategyFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StrategyRecord>> {
        let records = sqlx::query_as::<_, StrategyRecord>(
            r#"
            SELECT id, title, description, strategy_type, target_audience, required_resources,
                   implementation_timeline, owner, active, created_at
            FROM prevention_strategies
            WHERE ($1::text IS NULL OR strategy_type = $1)
              AND ($2::boolean IS NULL OR active = $2)
              AND ($3::text IS NULL
                   OR title ILIKE $3 OR description ILIKE $3
                   OR target_audience ILIKE $3 OR owner ILIKE $3)
            ORDER BY created_at DESC, id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(&filter.strategy_type)
        .bind(filter.active)
        .bind(filter.search_pattern())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn count(pool: &PgPool, filter: &StrategyFilter) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)::bigint
            FROM prevention_strategies
            WHERE ($1::text IS NULL OR strategy_type = $1)
              AND ($2::boolean IS NULL OR active = $2)
              AND ($3::text IS NULL
                   OR title ILIKE $3 OR description ILIKE $3
                   OR target_audience ILIKE $3 OR owner ILIKE $3)
            "#,
        )
        .bind(&filter.strategy_type)
        .bind(filter.active)
        .bind(filter.search_pattern())
        .fetch_one(pool)
        .await?;

        Ok(count.0)
    }

    /// All active strategies, newest first
    pub async fn list_active(pool: &PgPool) -> Result<Vec<StrategyRecord>> {
        Self::recent_active(pool, i64::MAX).await
    }

    /// The `limit` most recent active strategies
    pub async fn recent_active(pool: &PgPool, limit: i64) -> Result<Vec<StrategyRecord>> {
        let records = sqlx::query_as::<_, StrategyRecord>(
            r#"
            SELECT id, title, description, strategy_type, target_audience, required_resources,
                   implementation_timeline, owner, active, created_at
            FROM prevention_strategies
            WHERE active
            ORDER BY created_at DESC, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
