//! Barrier repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Barrier record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BarrierRecord {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub category: String,
    pub description: String,
    pub intensity: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for logging a barrier
#[derive(Debug, Clone)]
pub struct CreateBarrier {
    pub participant_id: Uuid,
    pub category: String,
    pub description: String,
    pub intensity: i32,
}

/// Barrier repository for database operations
pub struct BarrierRepository;

impl BarrierRepository {
    /// Log a barrier for a participant
    pub async fn create(pool: &PgPool, input: CreateBarrier) -> Result<BarrierRecord> {
        let record = sqlx::query_as::<_, BarrierRecord>(
            r#"
            INSERT INTO barriers (participant_id, category, description, intensity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, participant_id, category, description, intensity, created_at
            "#,
        )
        .bind(input.participant_id)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.intensity)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// All barriers of one participant, most intense first
    pub async fn list_for_participant(
        pool: &PgPool,
        participant_id: Uuid,
    ) -> Result<Vec<BarrierRecord>> {
        let records = sqlx::query_as::<_, BarrierRecord>(
            r#"
            SELECT id, participant_id, category, description, intensity, created_at
            FROM barriers
            WHERE participant_id = $1
            ORDER BY intensity DESC, created_at DESC
            "#,
        )
        .bind(participant_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// List barriers across participants
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        intensity: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BarrierRecord>> {
        let records = sqlx::query_as::<_, BarrierRecord>(
            r#"
            SELECT id, participant_id, category, description, intensity, created_at
            FROM barriers
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::int IS NULL OR intensity = $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(category)
        .bind(intensity)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Count barriers matching the filters
    pub async fn count(pool: &PgPool, category: Option<&str>, intensity: Option<i32>) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)::bigint
            FROM barriers
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::int IS NULL OR intensity = $2)
            "#,
        )
        .bind(category)
        .bind(intensity)
        .fetch_one(pool)
        .await?;

        Ok(count.0)
    }

    /// Delete a barrier
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM barriers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
