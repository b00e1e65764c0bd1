//! Anonymised dataset export
//!
//! One CSV row per questionnaire with demographics and BMI. Names and
//! emails never leave the database through this path.

use super::decimal_to_f64;
use crate::error::ApiError;
use crate::repositories::{ExportRow, StatisticsRepository};
use sedentarism_shared::health_metrics::classify_stored_bmi;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

/// CSV header, in `QuestionnaireCsvRow` field order
pub const QUESTIONNAIRE_CSV_HEADER: [&str; 15] = [
    "participant_type",
    "sex",
    "age",
    "vigorous_days",
    "vigorous_minutes",
    "moderate_days",
    "moderate_minutes",
    "walking_days",
    "walking_minutes",
    "sitting_hours_weekday",
    "sitting_hours_weekend",
    "total_met",
    "activity_level",
    "bmi",
    "bmi_category",
];

/// Flat CSV row
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireCsvRow {
    pub participant_type: String,
    pub sex: String,
    pub age: i32,
    pub vigorous_days: i32,
    pub vigorous_minutes: i32,
    pub moderate_days: i32,
    pub moderate_minutes: i32,
    pub walking_days: i32,
    pub walking_minutes: i32,
    pub sitting_hours_weekday: f64,
    pub sitting_hours_weekend: f64,
    pub total_met: f64,
    pub activity_level: String,
    /// Empty when the participant has no health indicators
    pub bmi: Option<f64>,
    pub bmi_category: Option<String>,
}

impl From<ExportRow> for QuestionnaireCsvRow {
    fn from(row: ExportRow) -> Self {
        let bmi = row.bmi.as_ref().map(decimal_to_f64);
        Self {
            participant_type: row.participant_type,
            sex: row.sex,
            age: row.age,
            vigorous_days: row.vigorous_days,
            vigorous_minutes: row.vigorous_minutes,
            moderate_days: row.moderate_days,
            moderate_minutes: row.moderate_minutes,
            walking_days: row.walking_days,
            walking_minutes: row.walking_minutes,
            sitting_hours_weekday: decimal_to_f64(&row.sitting_hours_weekday),
            sitting_hours_weekend: decimal_to_f64(&row.sitting_hours_weekend),
            total_met: decimal_to_f64(&row.met_total),
            activity_level: row.activity_level,
            bmi,
            bmi_category: bmi
                .and_then(classify_stored_bmi)
                .map(|c| c.as_str().to_string()),
        }
    }
}

pub struct ExportService;

impl ExportService {
    /// Export every questionnaire as CSV
    ///
    /// The header row is always present, even with no questionnaires.
    pub async fn export_questionnaires_csv(pool: &PgPool) -> Result<String, ApiError> {
        let rows: Vec<QuestionnaireCsvRow> = StatisticsRepository::export_rows(pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(QuestionnaireCsvRow::from)
            .collect();

        info!(rows = rows.len(), "Questionnaire dataset exported");
        Self::to_csv(&QUESTIONNAIRE_CSV_HEADER, &rows)
    }

    /// Convert data to CSV format under an explicit header
    fn to_csv<T: Serialize>(header: &[&str], data: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.write_record(header)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV header error: {}", e)))?;
        for record in data {
            wtr.serialize(record)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn export_row(bmi: Option<Decimal>) -> ExportRow {
        ExportRow {
            participant_type: "student".to_string(),
            sex: "female".to_string(),
            age: 21,
            vigorous_days: 3,
            vigorous_minutes: 30,
            moderate_days: 2,
            moderate_minutes: 40,
            walking_days: 5,
            walking_minutes: 20,
            sitting_hours_weekday: Decimal::new(85, 1),
            sitting_hours_weekend: Decimal::new(50, 1),
            met_total: Decimal::new(137000, 2),
            activity_level: "moderate".to_string(),
            bmi,
        }
    }

    #[test]
    fn test_csv_header_excludes_identity() {
        let rows = vec![QuestionnaireCsvRow::from(export_row(Some(Decimal::new(2286, 2))))];
        let csv = ExportService::to_csv(&QUESTIONNAIRE_CSV_HEADER, &rows).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("participant_type,sex,age,"));
        assert!(!header.contains("name"));
        assert!(!header.contains("email"));
        assert!(csv.lines().nth(1).unwrap().ends_with(",moderate,22.86,normal"));
    }

    #[test]
    fn test_missing_or_zero_bmi_leaves_category_empty() {
        let missing = QuestionnaireCsvRow::from(export_row(None));
        assert!(missing.bmi.is_none() && missing.bmi_category.is_none());

        let zero = QuestionnaireCsvRow::from(export_row(Some(Decimal::ZERO)));
        assert_eq!(zero.bmi, Some(0.0));
        assert!(zero.bmi_category.is_none());
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let csv = ExportService::to_csv::<QuestionnaireCsvRow>(&QUESTIONNAIRE_CSV_HEADER, &[]).unwrap();
        assert_eq!(csv, format!("{}\n", QUESTIONNAIRE_CSV_HEADER.join(",")));
    }

    #[test]
    fn test_header_matches_row_fields() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(QuestionnaireCsvRow::from(export_row(None))).unwrap();
        let derived = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(
            derived.lines().next().unwrap(),
            QUESTIONNAIRE_CSV_HEADER.join(",")
        );
    }
}
