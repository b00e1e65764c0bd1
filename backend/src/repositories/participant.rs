//! Participant repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Participant record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub sex: String,
    pub participant_type: String,
    pub course: Option<String>,
    pub department: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Input for creating or replacing a participant
#[derive(Debug, Clone)]
pub struct ParticipantInput {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub sex: String,
    pub participant_type: String,
    pub course: Option<String>,
    pub department: Option<String>,
}

/// Participant list filters
#[derive(Debug, Clone, Default)]
pub struct ParticipantFilter {
    pub participant_type: Option<String>,
    pub sex: Option<String>,
    /// Raw search text, matched case-insensitively
    pub search: Option<String>,
}

impl ParticipantFilter {
    fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| format!("%{}%", s.trim()))
    }
}

/// Participant repository for database operations
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Register a participant
    pub async fn create(pool: &PgPool, input: ParticipantInput) -> Result<ParticipantRecord> {
        let record = sqlx::query_as::<_, ParticipantRecord>(
            r#"
            INSERT INTO participants (name, email, age, sex, participant_type, course, department)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, age, sex, participant_type, course, department, registered_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.age)
        .bind(&input.sex)
        .bind(&input.participant_type)
        .bind(&input.course)
        .bind(&input.department)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find participant by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ParticipantRecord>> {
        let record = sqlx::query_as::<_, ParticipantRecord>(
            r#"
            SELECT id, name, email, age, sex, participant_type, course, department, registered_at
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check whether a participant exists
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM participants WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists.0)
    }

    /// Replace the demographic fields of a participant
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: ParticipantInput,
    ) -> Result<Option<ParticipantRecord>> {
        let record = sqlx::query_as::<_, ParticipantRecord>(
            r#"
            UPDATE participants
            SET name = $2, email = $3, age = $4, sex = $5,
                participant_type = $6, course = $7, department = $8
            WHERE id = $1
            RETURNING id, name, email, age, sex, participant_type, course, department, registered_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.age)
        .bind(&input.sex)
        .bind(&input.participant_type)
        .bind(&input.course)
        .bind(&input.department)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a participant; dependent rows go with it
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List participants, newest first
    pub async fn list(
        pool: &PgPool,
        filter: &ParticipantFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ParticipantRecord>> {
        let records = sqlx::query_as::<_, ParticipantRecord>(
            r#"
            SELECT id, name, email, age, sex, participant_type, course, department, registered_at
            FROM participants
            WHERE ($1::text IS NULL OR participant_type = $1)
              AND ($2::text IS NULL OR sex = $2)
              AND ($3::text IS NULL
                   OR name ILIKE $3 OR email ILIKE $3
                   OR course ILIKE $3 OR department ILIKE $3)
            ORDER BY registered_at DESC, id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(&filter.participant_type)
        .bind(&filter.sex)
        .bind(filter.search_pattern())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Count participants matching a filter
    pub async fn count(pool: &PgPool, filter: &ParticipantFilter) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)::bigint
            FROM participants
            WHERE ($1::text IS NULL OR participant_type = $1)
              AND ($2::text IS NULL OR sex = $2)
              AND ($3::text IS NULL
                   OR name ILIKE $3 OR email ILIKE $3
                   OR course ILIKE $3 OR department ILIKE $3)
            "#,
        )
        .bind(&filter.participant_type)
        .bind(&filter.sex)
        .bind(filter.search_pattern())
        .fetch_one(pool)
        .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_wraps_trimmed_text() {
        let filter = ParticipantFilter {
            search: Some("  ana ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern().as_deref(), Some("%ana%"));
        assert!(ParticipantFilter::default().search_pattern().is_none());
    }
}
