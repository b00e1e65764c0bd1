//! IPAQ questionnaire repository for database operations
//!
//! Writes accept only [`ScoredQuestionnaire`], so the stored score columns
//! always come from a fresh recomputation of the stored inputs.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sedentarism_shared::ipaq::ScoredQuestionnaire;
use sqlx::PgPool;
use uuid::Uuid;

/// Questionnaire record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestionnaireRecord {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub vigorous_days: i32,
    pub vigorous_minutes: i32,
    pub moderate_days: i32,
    pub moderate_minutes: i32,
    pub walking_days: i32,
    pub walking_minutes: i32,
    pub sitting_hours_weekday: Decimal,
    pub sitting_hours_weekend: Decimal,
    pub met_total: Decimal,
    pub activity_level: String,
    pub completed_at: DateTime<Utc>,
}

/// Questionnaire repository for database operations
pub struct QuestionnaireRepository;

impl QuestionnaireRepository {
    /// Insert or replace the participant's questionnaire in one statement
    pub async fn upsert(
        pool: &PgPool,
        participant_id: Uuid,
        scored: &ScoredQuestionnaire,
    ) -> Result<QuestionnaireRecord> {
        let input = scored.input();
        let record = sqlx::query_as::<_, QuestionnaireRecord>(
            r#"
            INSERT INTO ipaq_questionnaires
                (participant_id, vigorous_days, vigorous_minutes, moderate_days, moderate_minutes,
                 walking_days, walking_minutes, sitting_hours_weekday, sitting_hours_weekend,
                 met_total, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (participant_id) DO UPDATE SET
                vigorous_days = EXCLUDED.vigorous_days,
                vigorous_minutes = EXCLUDED.vigorous_minutes,
                moderate_days = EXCLUDED.moderate_days,
                moderate_minutes = EXCLUDED.moderate_minutes,
                walking_days = EXCLUDED.walking_days,
                walking_minutes = EXCLUDED.walking_minutes,
                sitting_hours_weekday = EXCLUDED.sitting_hours_weekday,
                sitting_hours_weekend = EXCLUDED.sitting_hours_weekend,
                met_total = EXCLUDED.met_total,
                activity_level = EXCLUDED.activity_level,
                completed_at = NOW()
            RETURNING id, participant_id, vigorous_days, vigorous_minutes, moderate_days,
                      moderate_minutes, walking_days, walking_minutes, sitting_hours_weekday,
                      sitting_hours_weekend, met_total, activity_level, completed_at
            "#,
        )
        .bind(participant_id)
        .bind(input.vigorous_days as i32)
        .bind(input.vigorous_minutes as i32)
        .bind(input.moderate_days as i32)
        .bind(input.moderate_minutes as i32)
        .bind(input.walking_days as i32)
        .bind(input.walking_minutes as i32)
        .bind(input.sitting_hours_weekday)
        .bind(input.sitting_hours_weekend)
        .bind(scored.total_met())
        .bind(scored.activity_level().as_str())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a participant's questionnaire
    pub async fn find_by_participant(
        pool: &PgPool,
        participant_id: Uuid,
    ) -> Result<Option<QuestionnaireRecord>> {
        let record = sqlx::query_as::<_, QuestionnaireRecord>(
            r#"
            SELECT id, participant_id, vigorous_days, vigorous_minutes, moderate_days,
                   moderate_minutes, walking_days, walking_minutes, sitting_hours_weekday,
                   sitting_hours_weekend, met_total, activity_level, completed_at
            FROM ipaq_questionnaires
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List questionnaires, newest first, optionally by activity level
    pub async fn list(
        pool: &PgPool,
        activity_level: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuestionnaireRecord>> {
        let records = sqlx::query_as::<_, QuestionnaireRecord>(
            r#"
            SELECT id, participant_id, vigorous_days, vigorous_minutes, moderate_days,
                   moderate_minutes, walking_days, walking_minutes, sitting_hours_weekday,
                   sitting_hours_weekend, met_total, activity_level, completed_at
            FROM ipaq_questionnaires
            WHERE ($1::text IS NULL OR activity_level = $1)
            ORDER BY completed_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(activity_level)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Count questionnaires, optionally by activity level
    pub async fn count(pool: &PgPool, activity_level: Option<&str>) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)::bigint
            FROM ipaq_questionnaires
            WHERE ($1::text IS NULL OR activity_level = $1)
            "#,
        )
        .bind(activity_level)
        .fetch_one(pool)
        .await?;

        Ok(count.0)
    }
}
