//! API request and response types

use crate::health_metrics::{BmiCategory, HealthIndicators};
use crate::ipaq::{ActivityLevel, ActivityQuestionnaire, MetBreakdown};
use crate::models::{AgeBand, BarrierCategory, ParticipantType, Sex, StrategyType};
use crate::validation::{
    check_field, validate_age, validate_blood_pressure, validate_days_per_week, validate_email,
    validate_height_m, validate_intensity, validate_minutes_per_day, validate_required_text,
    validate_sitting_hours, validate_weight_kg, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 50;
/// Maximum page size for list endpoints
pub const MAX_PAGE_SIZE: i64 = 100;

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total_count: i64, limit: i64, offset: i64) -> Self {
        let has_more = offset + (items.len() as i64) < total_count;
        Self {
            items,
            total_count,
            limit,
            offset,
            has_more,
        }
    }
}

/// Clamp pagination parameters into the accepted range
pub fn normalize_page(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_PAGE_SIZE), offset.max(0))
}

// ============================================================================
// Participant Types
// ============================================================================

/// Participant registration/update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParticipantRequest {
    #[validate(length(min = 1, max = 150, message = "Must be between 1 and 150 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub age: u32,
    pub sex: Sex,
    pub participant_type: ParticipantType,
    /// Course, for students
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub course: Option<String>,
    /// Department, for staff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub department: Option<String>,
}

impl ParticipantRequest {
    /// Checks not covered by the derive
    pub fn check(&self) -> Result<(), ValidationError> {
        check_field("name", validate_required_text(&self.name, 150))?;
        check_field("email", validate_email(&self.email))?;
        check_field("age", validate_age(self.age))
    }
}

/// Participant response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub sex: Sex,
    pub participant_type: ParticipantType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Participant list query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantListQuery {
    #[serde(default)]
    pub participant_type: Option<ParticipantType>,
    #[serde(default)]
    pub sex: Option<Sex>,
    /// Case-insensitive match on name, email, course or department
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl ParticipantListQuery {
    pub fn normalize(mut self) -> Self {
        (self.limit, self.offset) = normalize_page(self.limit, self.offset);
        self.search = self.search.filter(|s| !s.trim().is_empty());
        self
    }
}

// ============================================================================
// IPAQ Questionnaire Types
// ============================================================================

/// Questionnaire submission (create or full re-submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuestionnaireRequest {
    pub vigorous_days: u32,
    pub vigorous_minutes: u32,
    pub moderate_days: u32,
    pub moderate_minutes: u32,
    pub walking_days: u32,
    pub walking_minutes: u32,
    pub sitting_hours_weekday: f64,
    pub sitting_hours_weekend: f64,
}

impl SubmitQuestionnaireRequest {
    /// Check every answer is within its allowed range
    pub fn check(&self) -> Result<(), ValidationError> {
        check_field("vigorous_days", validate_days_per_week(self.vigorous_days))?;
        check_field("vigorous_minutes", validate_minutes_per_day(self.vigorous_minutes))?;
        check_field("moderate_days", validate_days_per_week(self.moderate_days))?;
        check_field("moderate_minutes", validate_minutes_per_day(self.moderate_minutes))?;
        check_field("walking_days", validate_days_per_week(self.walking_days))?;
        check_field("walking_minutes", validate_minutes_per_day(self.walking_minutes))?;
        check_field(
            "sitting_hours_weekday",
            validate_sitting_hours(self.sitting_hours_weekday),
        )?;
        check_field(
            "sitting_hours_weekend",
            validate_sitting_hours(self.sitting_hours_weekend),
        )
    }
}

impl From<SubmitQuestionnaireRequest> for ActivityQuestionnaire {
    fn from(req: SubmitQuestionnaireRequest) -> Self {
        ActivityQuestionnaire {
            vigorous_days: req.vigorous_days,
            vigorous_minutes: req.vigorous_minutes,
            moderate_days: req.moderate_days,
            moderate_minutes: req.moderate_minutes,
            walking_days: req.walking_days,
            walking_minutes: req.walking_minutes,
            sitting_hours_weekday: req.sitting_hours_weekday,
            sitting_hours_weekend: req.sitting_hours_weekend,
        }
    }
}

/// Stored questionnaire with its derived score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: String,
    pub participant_id: String,
    pub vigorous_days: u32,
    pub vigorous_minutes: u32,
    pub moderate_days: u32,
    pub moderate_minutes: u32,
    pub walking_days: u32,
    pub walking_minutes: u32,
    pub sitting_hours_weekday: f64,
    pub sitting_hours_weekend: f64,
    pub total_met: f64,
    pub activity_level: ActivityLevel,
    /// MET-minutes/week per intensity
    pub breakdown: MetBreakdown,
    pub completed_at: DateTime<Utc>,
}

/// Questionnaire list query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireListQuery {
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl QuestionnaireListQuery {
    pub fn normalize(mut self) -> Self {
        (self.limit, self.offset) = normalize_page(self.limit, self.offset);
        self
    }
}

// ============================================================================
// Health Indicator Types
// ============================================================================

/// Health indicator submission (create or full re-submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitHealthIndicatorsRequest {
    pub weight_kg: f64,
    pub height_m: f64,
    pub systolic_pressure: u32,
    pub diastolic_pressure: u32,
    #[serde(default)]
    pub has_diabetes: bool,
    #[serde(default)]
    pub has_hypertension: bool,
    #[serde(default)]
    pub has_obesity: bool,
    #[serde(default)]
    pub has_cardiovascular_disease: bool,
    #[serde(default)]
    pub smokes: bool,
    #[serde(default)]
    pub consumes_alcohol: bool,
}

impl SubmitHealthIndicatorsRequest {
    /// Check measurements are physiologically plausible
    pub fn check(&self) -> Result<(), ValidationError> {
        check_field("weight_kg", validate_weight_kg(self.weight_kg))?;
        check_field("height_m", validate_height_m(self.height_m))?;
        check_field(
            "blood_pressure",
            validate_blood_pressure(self.systolic_pressure, self.diastolic_pressure),
        )
    }
}

impl From<SubmitHealthIndicatorsRequest> for HealthIndicators {
    fn from(req: SubmitHealthIndicatorsRequest) -> Self {
        HealthIndicators {
            weight_kg: req.weight_kg,
            height_m: req.height_m,
            systolic_pressure: req.systolic_pressure,
            diastolic_pressure: req.diastolic_pressure,
            has_diabetes: req.has_diabetes,
            has_hypertension: req.has_hypertension,
            has_obesity: req.has_obesity,
            has_cardiovascular_disease: req.has_cardiovascular_disease,
            smokes: req.smokes,
            consumes_alcohol: req.consumes_alcohol,
        }
    }
}

/// Stored health indicators with derived BMI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthIndicatorsResponse {
    pub id: String,
    pub participant_id: String,
    pub weight_kg: f64,
    pub height_m: f64,
    /// 0 when not computable
    pub bmi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<BmiCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_weight_range_kg: Option<(f64, f64)>,
    pub systolic_pressure: u32,
    pub diastolic_pressure: u32,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_obesity: bool,
    pub has_cardiovascular_disease: bool,
    pub smokes: bool,
    pub consumes_alcohol: bool,
    pub assessed_at: DateTime<Utc>,
}

// ============================================================================
// Barrier Types
// ============================================================================

/// Barrier log request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBarrierRequest {
    pub category: BarrierCategory,
    #[validate(length(min = 1, message = "Cannot be empty"))]
    pub description: String,
    /// 1 (mild) to 5 (very intense)
    pub intensity: u32,
}

impl CreateBarrierRequest {
    /// Range checks not covered by the derive
    pub fn check(&self) -> Result<(), ValidationError> {
        check_field("intensity", validate_intensity(self.intensity))
    }
}

/// Barrier response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierResponse {
    pub id: String,
    pub participant_id: String,
    pub category: BarrierCategory,
    pub description: String,
    pub intensity: u32,
}

/// Barrier list query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierListQuery {
    #[serde(default)]
    pub category: Option<BarrierCategory>,
    #[serde(default)]
    pub intensity: Option<u32>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl BarrierListQuery {
    pub fn normalize(mut self) -> Self {
        (self.limit, self.offset) = normalize_page(self.limit, self.offset);
        self
    }
}

// ============================================================================
// Prevention Strategy Types
// ============================================================================

/// Strategy create/update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StrategyRequest {
    #[validate(length(min = 1, max = 200, message = "Must be between 1 and 200 characters"))]
    pub title: String,
    pub description: String,
    pub strategy_type: StrategyType,
    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub target_audience: String,
    pub required_resources: String,
    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub implementation_timeline: String,
    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub owner: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Strategy response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub strategy_type: StrategyType,
    pub target_audience: String,
    pub required_resources: String,
    pub implementation_timeline: String,
    pub owner: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Strategy list query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyListQuery {
    #[serde(default)]
    pub strategy_type: Option<StrategyType>,
    #[serde(default)]
    pub active: Option<bool>,
    /// Case-insensitive match on title, description, target audience or owner
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl StrategyListQuery {
    pub fn normalize(mut self) -> Self {
        (self.limit, self.offset) = normalize_page(self.limit, self.offset);
        self.search = self.search.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Active strategies grouped by scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishedStrategiesResponse {
    pub individual: Vec<StrategyResponse>,
    pub institutional: Vec<StrategyResponse>,
    pub community: Vec<StrategyResponse>,
}

// ============================================================================
// Statistics Types
// ============================================================================

/// Count of records sharing one value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountBucket<K> {
    pub key: K,
    pub total: i64,
}

/// Barrier category frequency with its mean intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierStat {
    pub category: BarrierCategory,
    pub total: i64,
    pub average_intensity: f64,
}

/// Dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_participants: i64,
    pub total_questionnaires: i64,
    pub participants_by_type: Vec<CountBucket<ParticipantType>>,
    pub activity_levels: Vec<CountBucket<ActivityLevel>>,
    pub top_barriers: Vec<BarrierStat>,
    pub recent_strategies: Vec<StrategyResponse>,
}

/// Disease prevalence counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrevalenceCounts {
    pub diabetes: i64,
    pub hypertension: i64,
    pub obesity: i64,
}

/// Study results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub total_participants: i64,
    pub participants_by_sex: Vec<CountBucket<Sex>>,
    pub age_bands: Vec<CountBucket<AgeBand>>,
    /// Share of participants with a low activity level, in percent (1 decimal)
    pub sedentary_percentage: f64,
    /// Mean BMI over computable values (1 decimal), 0 if none
    pub average_bmi: f64,
    pub prevalence: PrevalenceCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{MAX_STORED_BMI, MAX_WEIGHT_KG, MIN_HEIGHT_M};

    #[test]
    fn test_paginated_response_has_more() {
        let page = PaginatedResponse::new(vec![1, 2], 5, 2, 0);
        assert!(page.has_more);
        let page = PaginatedResponse::new(vec![5], 5, 2, 4);
        assert!(!page.has_more);
    }

    #[test]
    fn test_normalize_page_clamps() {
        assert_eq!(normalize_page(0, -3), (1, 0));
        assert_eq!(normalize_page(500, 10), (MAX_PAGE_SIZE, 10));
        assert_eq!(normalize_page(20, 0), (20, 0));
    }

    #[test]
    fn test_participant_query_drops_blank_search() {
        let query: ParticipantListQuery =
            serde_json::from_str(r#"{"search": "   ", "limit": 1000}"#).unwrap();
        let query = query.normalize();
        assert!(query.search.is_none());
        assert_eq!(query.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_questionnaire_check_rejects_eight_days() {
        let req: SubmitQuestionnaireRequest = serde_json::from_str(
            r#"{
                "vigorous_days": 8, "vigorous_minutes": 30,
                "moderate_days": 0, "moderate_minutes": 0,
                "walking_days": 0, "walking_minutes": 0,
                "sitting_hours_weekday": 6.0, "sitting_hours_weekend": 4.0
            }"#,
        )
        .unwrap();
        let err = req.check().unwrap_err();
        assert_eq!(err.field, "vigorous_days");
    }

    #[test]
    fn test_negative_minutes_rejected_at_parse() {
        let parsed: Result<SubmitQuestionnaireRequest, _> = serde_json::from_str(
            r#"{
                "vigorous_days": 1, "vigorous_minutes": -30,
                "moderate_days": 0, "moderate_minutes": 0,
                "walking_days": 0, "walking_minutes": 0,
                "sitting_hours_weekday": 6.0, "sitting_hours_weekend": 4.0
            }"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_strategy_request_defaults_active() {
        let req: StrategyRequest = serde_json::from_str(
            r#"{
                "title": "Active breaks", "description": "Short walks between classes",
                "strategy_type": "institutional", "target_audience": "Students",
                "required_resources": "None", "implementation_timeline": "1 semester",
                "owner": "Sports department"
            }"#,
        )
        .unwrap();
        assert!(req.active);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_health_check_rejects_inverted_pressure() {
        let req: SubmitHealthIndicatorsRequest = serde_json::from_str(
            r#"{"weight_kg": 70.0, "height_m": 1.75, "systolic_pressure": 80, "diastolic_pressure": 120}"#,
        )
        .unwrap();
        assert_eq!(req.check().unwrap_err().field, "blood_pressure");
    }

    #[test]
    fn test_barrier_check_rejects_zero_intensity() {
        let req = CreateBarrierRequest {
            category: BarrierCategory::Time,
            description: "Long commute".to_string(),
            intensity: 0,
        };
        assert!(req.validate().is_ok());
        assert_eq!(req.check().unwrap_err().field, "intensity");
    }

    #[test]
    fn test_extreme_accepted_measurements_fit_bmi_column() {
        let req = SubmitHealthIndicatorsRequest {
            weight_kg: MAX_WEIGHT_KG,
            height_m: MIN_HEIGHT_M,
            systolic_pressure: 120,
            diastolic_pressure: 80,
            has_diabetes: false,
            has_hypertension: false,
            has_obesity: false,
            has_cardiovascular_disease: false,
            smokes: false,
            consumes_alcohol: false,
        };
        assert!(req.check().is_ok());
        let bmi = HealthIndicators::from(req).bmi();
        assert!(bmi > 0.0 && bmi <= MAX_STORED_BMI, "bmi {} overflows storage", bmi);
    }

    #[test]
    fn test_health_check_rejects_height_below_minimum() {
        let req: SubmitHealthIndicatorsRequest = serde_json::from_str(
            r#"{"weight_kg": 500.0, "height_m": 0.2, "systolic_pressure": 120, "diastolic_pressure": 80}"#,
        )
        .unwrap();
        assert_eq!(req.check().unwrap_err().field, "height_m");
    }

    #[test]
    fn test_health_flags_default_false() {
        let req: SubmitHealthIndicatorsRequest = serde_json::from_str(
            r#"{"weight_kg": 70.0, "height_m": 1.75, "systolic_pressure": 120, "diastolic_pressure": 80}"#,
        )
        .unwrap();
        let indicators = HealthIndicators::from(req);
        assert!(!indicators.has_diabetes && !indicators.smokes);
        assert!((indicators.bmi() - 22.857142857142858).abs() < 1e-9);
    }
}
