//! Read-only aggregate queries for the dashboard, study results and export
//!
//! Nothing here recomputes a score: every MET total, level and BMI is read
//! as stored.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Count of rows sharing one stored value
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KeyCount {
    pub key: String,
    pub total: i64,
}

/// Barrier category frequency
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BarrierCategoryStats {
    pub category: String,
    pub total: i64,
    pub average_intensity: f64,
}

/// Disease prevalence counts
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PrevalenceRecord {
    pub diabetes: i64,
    pub hypertension: i64,
    pub obesity: i64,
}

/// Anonymised questionnaire row for dataset export
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExportRow {
    pub participant_type: String,
    pub sex: String,
    pub age: i32,
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
    pub bmi: Option<Decimal>,
}

/// Statistics repository for aggregate queries
pub struct StatisticsRepository;

impl StatisticsRepository {
    pub async fn count_participants(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*)::bigint FROM participants")
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    pub async fn count_questionnaires(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*)::bigint FROM ipaq_questionnaires")
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    /// Participants per type, most frequent first
    pub async fn participants_by_type(pool: &PgPool) -> Result<Vec<KeyCount>> {
        let rows = sqlx::query_as::<_, KeyCount>(
            r#"
            SELECT participant_type AS key, COUNT(*)::bigint AS total
            FROM participants
            GROUP BY participant_type
            ORDER BY total DESC, key
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Participants per sex, most frequent first
    pub async fn participants_by_sex(pool: &PgPool) -> Result<Vec<KeyCount>> {
        let rows = sqlx::query_as::<_, KeyCount>(
            r#"
            SELECT sex AS key, COUNT(*)::bigint AS total
            FROM participants
            GROUP BY sex
            ORDER BY total DESC, key
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Questionnaires per stored activity level, most frequent first
    pub async fn activity_levels(pool: &PgPool) -> Result<Vec<KeyCount>> {
        let rows = sqlx::query_as::<_, KeyCount>(
            r#"
            SELECT activity_level AS key, COUNT(*)::bigint AS total
            FROM ipaq_questionnaires
            GROUP BY activity_level
            ORDER BY total DESC, key
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Most frequently reported barrier categories
    pub async fn top_barriers(pool: &PgPool, limit: i64) -> Result<Vec<BarrierCategoryStats>> {
        let rows = sqlx::query_as::<_, BarrierCategoryStats>(
            r#"
            SELECT category,
                   COUNT(*)::bigint AS total,
                   AVG(intensity)::float8 AS average_intensity
            FROM barriers
            GROUP BY category
            ORDER BY total DESC, category
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn participant_ages(pool: &PgPool) -> Result<Vec<i32>> {
        let rows: Vec<(i32,)> = sqlx::query_as("SELECT age FROM participants")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Number of questionnaires whose stored level is `level`
    pub async fn count_with_activity_level(pool: &PgPool, level: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)::bigint FROM ipaq_questionnaires WHERE activity_level = $1",
        )
        .bind(level)
        .fetch_one(pool)
        .await?;

        Ok(count.0)
    }

    /// Every stored BMI, including 0 placeholders
    pub async fn stored_bmis(pool: &PgPool) -> Result<Vec<Decimal>> {
        let rows: Vec<(Decimal,)> = sqlx::query_as("SELECT bmi FROM health_indicators")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    pub async fn prevalence(pool: &PgPool) -> Result<PrevalenceRecord> {
        let record = sqlx::query_as::<_, PrevalenceRecord>(
            r#"
            SELECT COUNT(*) FILTER (WHERE has_diabetes)::bigint AS diabetes,
                   COUNT(*) FILTER (WHERE has_hypertension)::bigint AS hypertension,
                   COUNT(*) FILTER (WHERE has_obesity)::bigint AS obesity
            FROM health_indicators
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Questionnaires joined with demographics and BMI, oldest first
    pub async fn export_rows(pool: &PgPool) -> Result<Vec<ExportRow>> {
        let rows = sqlx::query_as::<_, ExportRow>(
            r#"
            SELECT p.participant_type, p.sex, p.age,
                   q.vigorous_days, q.vigorous_minutes, q.moderate_days, q.moderate_minutes,
                   q.walking_days, q.walking_minutes, q.sitting_hours_weekday,
                   q.sitting_hours_weekend, q.met_total, q.activity_level,
                   h.bmi
            FROM ipaq_questionnaires q
            JOIN participants p ON p.id = q.participant_id
            LEFT JOIN health_indicators h ON h.participant_id = q.participant_id
            ORDER BY q.completed_at, q.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
