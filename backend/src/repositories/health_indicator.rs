//! Health indicator repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sedentarism_shared::health_metrics::AssessedHealthIndicators;
use sqlx::PgPool;
use uuid::Uuid;

/// Health indicator record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HealthIndicatorRecord {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub weight_kg: Decimal,
    pub height_m: Decimal,
    pub bmi: Decimal,
    pub systolic_pressure: i32,
    pub diastolic_pressure: i32,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_obesity: bool,
    pub has_cardiovascular_disease: bool,
    pub smokes: bool,
    pub consumes_alcohol: bool,
    pub assessed_at: DateTime<Utc>,
}

/// Health indicator repository for database operations
pub struct HealthIndicatorRepository;

impl HealthIndicatorRepository {
    /// Insert or replace the participant's health indicators with fresh BMI
    pub async fn upsert(
        pool: &PgPool,
        participant_id: Uuid,
        assessed: &AssessedHealthIndicators,
    ) -> Result<HealthIndicatorRecord> {
        let input = assessed.input();
        let record = sqlx::query_as::<_, HealthIndicatorRecord>(
            r#"
            INSERT INTO health_indicators
                (participant_id, weight_kg, height_m, bmi, systolic_pressure, diastolic_pressure,
                 has_diabetes, has_hypertension, has_obesity, has_cardiovascular_disease,
                 smokes, consumes_alcohol)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (participant_id) DO UPDATE SET
                weight_kg = EXCLUDED.weight_kg,
                height_m = EXCLUDED.height_m,
                bmi = EXCLUDED.bmi,
                systolic_pressure = EXCLUDED.systolic_pressure,
                diastolic_pressure = EXCLUDED.diastolic_pressure,
                has_diabetes = EXCLUDED.has_diabetes,
                has_hypertension = EXCLUDED.has_hypertension,
                has_obesity = EXCLUDED.has_obesity,
                has_cardiovascular_disease = EXCLUDED.has_cardiovascular_disease,
                smokes = EXCLUDED.smokes,
                consumes_alcohol = EXCLUDED.consumes_alcohol,
                assessed_at = NOW()
            RETURNING id, participant_id, weight_kg, height_m, bmi, systolic_pressure,
                      diastolic_pressure, has_diabetes, has_hypertension, has_obesity,
                      has_cardiovascular_disease, smokes, consumes_alcohol, assessed_at
            "#,
        )
        .bind(participant_id)
        .bind(input.weight_kg)
        .bind(input.height_m)
        .bind(assessed.bmi())
        .bind(input.systolic_pressure as i32)
        .bind(input.diastolic_pressure as i32)
        .bind(input.has_diabetes)
        .bind(input.has_hypertension)
        .bind(input.has_obesity)
        .bind(input.has_cardiovascular_disease)
        .bind(input.smokes)
        .bind(input.consumes_alcohol)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a participant's health indicators
    pub async fn find_by_participant(
        pool: &PgPool,
        participant_id: Uuid,
    ) -> Result<Option<HealthIndicatorRecord>> {
        let record = sqlx::query_as::<_, HealthIndicatorRecord>(
            r#"
            SELECT id, participant_id, weight_kg, height_m, bmi, systolic_pressure,
                   diastolic_pressure, has_diabetes, has_hypertension, has_obesity,
                   has_cardiovascular_disease, smokes, consumes_alcohol, assessed_at
            FROM health_indicators
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
