//! Health indicator service

use super::{decimal_to_f64, ParticipantService};
use crate::error::ApiError;
use crate::repositories::{HealthIndicatorRecord, HealthIndicatorRepository};
use sedentarism_shared::health_metrics::{
    classify_stored_bmi, healthy_weight_range_kg, AssessedHealthIndicators,
};
use sedentarism_shared::types::{HealthIndicatorsResponse, SubmitHealthIndicatorsRequest};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Health indicator service for business logic
pub struct HealthIndicatorService;

impl HealthIndicatorService {
    /// Submit or re-submit a participant's health indicators
    pub async fn submit(
        pool: &PgPool,
        participant_id: Uuid,
        req: SubmitHealthIndicatorsRequest,
    ) -> Result<HealthIndicatorsResponse, ApiError> {
        let assessed = Self::assess_request(req)?;
        ParticipantService::ensure_exists(pool, participant_id).await?;

        let record = HealthIndicatorRepository::upsert(pool, participant_id, &assessed)
            .await
            .map_err(|e| ApiError::from_repository(e, "Health indicators already submitted"))?;

        let response = Self::to_response(record);
        info!(
            participant_id = %participant_id,
            bmi = response.bmi,
            bmi_category = ?response.bmi_category,
            "Health indicators assessed"
        );

        Ok(response)
    }

    /// Validate measurements and derive BMI
    pub fn assess_request(
        req: SubmitHealthIndicatorsRequest,
    ) -> Result<AssessedHealthIndicators, ApiError> {
        req.check()?;
        Ok(AssessedHealthIndicators::recompute(req.into()))
    }

    pub async fn get(
        pool: &PgPool,
        participant_id: Uuid,
    ) -> Result<HealthIndicatorsResponse, ApiError> {
        let record = HealthIndicatorRepository::find_by_participant(pool, participant_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Health indicators not found".to_string()))?;

        Ok(Self::to_response(record))
    }

    fn to_response(record: HealthIndicatorRecord) -> HealthIndicatorsResponse {
        let bmi = decimal_to_f64(&record.bmi);
        let height_m = decimal_to_f64(&record.height_m);
        let bmi_category = classify_stored_bmi(bmi);

        HealthIndicatorsResponse {
            id: record.id.to_string(),
            participant_id: record.participant_id.to_string(),
            weight_kg: decimal_to_f64(&record.weight_kg),
            height_m,
            bmi,
            bmi_category,
            healthy_weight_range_kg: bmi_category.map(|_| healthy_weight_range_kg(height_m)),
            systolic_pressure: record.systolic_pressure.max(0) as u32,
            diastolic_pressure: record.diastolic_pressure.max(0) as u32,
            has_diabetes: record.has_diabetes,
            has_hypertension: record.has_hypertension,
            has_obesity: record.has_obesity,
            has_cardiovascular_disease: record.has_cardiovascular_disease,
            smokes: record.smokes,
            consumes_alcohol: record.consumes_alcohol,
            assessed_at: record.assessed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sedentarism_shared::health_metrics::BmiCategory;

    fn request(weight_kg: f64, height_m: f64) -> SubmitHealthIndicatorsRequest {
        SubmitHealthIndicatorsRequest {
            weight_kg,
            height_m,
            systolic_pressure: 120,
            diastolic_pressure: 80,
            has_diabetes: false,
            has_hypertension: false,
            has_obesity: false,
            has_cardiovascular_disease: false,
            smokes: false,
            consumes_alcohol: false,
        }
    }

    #[test]
    fn test_assess_request_derives_bmi() {
        let assessed = HealthIndicatorService::assess_request(request(70.0, 1.75)).unwrap();
        assert!((assessed.bmi() - 22.857142857142858).abs() < 1e-9);
        assert_eq!(assessed.bmi_category(), Some(BmiCategory::Normal));
    }

    #[test]
    fn test_assess_request_rejects_zero_height() {
        let err = HealthIndicatorService::assess_request(request(70.0, 0.0)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { ref field, .. } if field == "height_m"));
    }

    fn record(weight_kg: Decimal, height_m: Decimal, bmi: Decimal) -> HealthIndicatorRecord {
        HealthIndicatorRecord {
            id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            weight_kg,
            height_m,
            bmi,
            systolic_pressure: 120,
            diastolic_pressure: 80,
            has_diabetes: false,
            has_hypertension: false,
            has_obesity: false,
            has_cardiovascular_disease: false,
            smokes: false,
            consumes_alcohol: false,
            assessed_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_zero_bmi_has_no_category() {
        let response =
            HealthIndicatorService::to_response(record(Decimal::new(7000, 2), Decimal::ZERO, Decimal::ZERO));
        assert_eq!(response.bmi, 0.0);
        assert!(response.bmi_category.is_none());
        assert!(response.healthy_weight_range_kg.is_none());
    }

    #[test]
    fn test_category_follows_stored_bmi() {
        // 24.996 unrounded is normal; the stored 25.00 is what gets reported
        let assessed = HealthIndicatorService::assess_request(request(76.55, 1.75)).unwrap();
        assert_eq!(assessed.bmi_category(), Some(BmiCategory::Normal));

        let response = HealthIndicatorService::to_response(record(
            Decimal::new(7655, 2),
            Decimal::new(1750, 3),
            Decimal::new(2500, 2),
        ));
        assert_eq!(response.bmi, 25.0);
        assert_eq!(response.bmi_category, Some(BmiCategory::Overweight));
    }
}
