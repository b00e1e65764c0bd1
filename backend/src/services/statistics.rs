//! Dashboard and study-result aggregation
//!
//! Reads stored scores only. Percentages and means are rounded to one
//! decimal place for presentation.

use super::{decimal_to_f64, parse_stored, StrategyService};
use crate::config::StatisticsConfig;
use crate::error::ApiError;
use crate::repositories::{KeyCount, StatisticsRepository, StrategyRepository};
use sedentarism_shared::ipaq::ActivityLevel;
use sedentarism_shared::models::AgeBand;
use sedentarism_shared::types::{
    BarrierStat, CountBucket, PrevalenceCounts, ResultsResponse, SummaryResponse,
};
use sqlx::PgPool;
use std::str::FromStr;

pub struct StatisticsService;

impl StatisticsService {
    /// Dashboard summary
    pub async fn summary(
        pool: &PgPool,
        config: &StatisticsConfig,
    ) -> Result<SummaryResponse, ApiError> {
        let total_participants = StatisticsRepository::count_participants(pool)
            .await
            .map_err(ApiError::Internal)?;
        let total_questionnaires = StatisticsRepository::count_questionnaires(pool)
            .await
            .map_err(ApiError::Internal)?;
        let participants_by_type = StatisticsRepository::participants_by_type(pool)
            .await
            .map_err(ApiError::Internal)
            .and_then(|rows| to_buckets("participant_type", rows))?;
        let activity_levels = StatisticsRepository::activity_levels(pool)
            .await
            .map_err(ApiError::Internal)
            .and_then(|rows| to_buckets("activity_level", rows))?;

        let top_barriers = StatisticsRepository::top_barriers(pool, config.top_barriers.max(0))
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|row| {
                Ok(BarrierStat {
                    category: parse_stored("category", &row.category)?,
                    total: row.total,
                    average_intensity: round_to(row.average_intensity, 1),
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let recent_strategies =
            StrategyRepository::recent_active(pool, config.recent_strategies.max(0))
                .await
                .map_err(ApiError::Internal)?
                .into_iter()
                .map(StrategyService::to_response)
                .collect::<Result<Vec<_>, _>>()?;

        Ok(SummaryResponse {
            total_participants,
            total_questionnaires,
            participants_by_type,
            activity_levels,
            top_barriers,
            recent_strategies,
        })
    }

    /// Study results: demographics, sedentarism prevalence and health markers
    pub async fn results(pool: &PgPool) -> Result<ResultsResponse, ApiError> {
        let total_participants = StatisticsRepository::count_participants(pool)
            .await
            .map_err(ApiError::Internal)?;
        let participants_by_sex = StatisticsRepository::participants_by_sex(pool)
            .await
            .map_err(ApiError::Internal)
            .and_then(|rows| to_buckets("sex", rows))?;
        let ages = StatisticsRepository::participant_ages(pool)
            .await
            .map_err(ApiError::Internal)?;
        let low_count =
            StatisticsRepository::count_with_activity_level(pool, ActivityLevel::Low.as_str())
                .await
                .map_err(ApiError::Internal)?;
        let bmis: Vec<f64> = StatisticsRepository::stored_bmis(pool)
            .await
            .map_err(ApiError::Internal)?
            .iter()
            .map(decimal_to_f64)
            .collect();
        let prevalence = StatisticsRepository::prevalence(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(ResultsResponse {
            total_participants,
            participants_by_sex,
            age_bands: age_histogram(&ages),
            sedentary_percentage: sedentary_percentage(low_count, total_participants),
            average_bmi: mean_bmi(&bmis),
            prevalence: PrevalenceCounts {
                diabetes: prevalence.diabetes,
                hypertension: prevalence.hypertension,
                obesity: prevalence.obesity,
            },
        })
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Share of participants classified LOW, in percent
///
/// The denominator is every registered participant, including those who
/// have not answered the questionnaire.
pub fn sedentary_percentage(low_count: i64, total_participants: i64) -> f64 {
    if total_participants <= 0 {
        return 0.0;
    }
    round_to(low_count as f64 / total_participants as f64 * 100.0, 1)
}

/// Mean of computable BMI values; stored zeros are skipped
pub fn mean_bmi(bmis: &[f64]) -> f64 {
    let computable: Vec<f64> = bmis.iter().copied().filter(|b| *b > 0.0).collect();
    if computable.is_empty() {
        return 0.0;
    }
    round_to(computable.iter().sum::<f64>() / computable.len() as f64, 1)
}

/// Histogram over every age band, in band order
pub fn age_histogram(ages: &[i32]) -> Vec<CountBucket<AgeBand>> {
    let mut counts = [0i64; AgeBand::ALL.len()];
    for age in ages {
        let band = AgeBand::for_age((*age).max(0) as u32);
        counts[band as usize] += 1;
    }

    AgeBand::ALL
        .into_iter()
        .zip(counts)
        .map(|(key, total)| CountBucket { key, total })
        .collect()
}

fn to_buckets<T>(column: &str, rows: Vec<KeyCount>) -> Result<Vec<CountBucket<T>>, ApiError>
where
    T: FromStr<Err = String>,
{
    rows.into_iter()
        .map(|row| {
            Ok(CountBucket {
                key: parse_stored(column, &row.key)?,
                total: row.total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use sedentarism_shared::models::ParticipantType;
    use tokio_test::{assert_err, assert_ok};

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(5, 0, 0.0)]
    #[case(1, 3, 33.3)]
    #[case(2, 3, 66.7)]
    #[case(4, 4, 100.0)]
    #[case(0, 10, 0.0)]
    fn test_sedentary_percentage(#[case] low: i64, #[case] total: i64, #[case] expected: f64) {
        assert_eq!(sedentary_percentage(low, total), expected);
    }

    #[test]
    fn test_mean_bmi_skips_zero() {
        assert_eq!(mean_bmi(&[22.0, 0.0, 26.0]), 24.0);
        assert_eq!(mean_bmi(&[0.0, 0.0]), 0.0);
        assert_eq!(mean_bmi(&[]), 0.0);
        assert_eq!(mean_bmi(&[22.86, 27.68, 31.14]), 27.2);
    }

    #[test]
    fn test_age_histogram_covers_all_bands() {
        let histogram = age_histogram(&[17, 22, 25, 26, 40, 55, 56, 80]);
        let totals: Vec<_> = histogram.iter().map(|b| (b.key.label(), b.total)).collect();
        assert_eq!(
            totals,
            [("18-25", 3), ("26-35", 1), ("36-45", 1), ("46-55", 1), ("56+", 2)]
        );
    }

    #[test]
    fn test_to_buckets_parses_keys() {
        let rows = vec![
            KeyCount { key: "student".to_string(), total: 7 },
            KeyCount { key: "staff".to_string(), total: 2 },
        ];
        let buckets = assert_ok!(to_buckets::<ParticipantType>("participant_type", rows));
        assert_eq!(buckets[0].key, ParticipantType::Student);
        assert_eq!(buckets[1].total, 2);

        let bad = vec![KeyCount { key: "visitor".to_string(), total: 1 }];
        assert_err!(to_buckets::<ParticipantType>("participant_type", bad));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: percentage always lies in [0, 100] when low <= total
        #[test]
        fn prop_sedentary_percentage_bounded(total in 1i64..10_000, share in 0.0f64..=1.0) {
            let low = (total as f64 * share).floor() as i64;
            let pct = sedentary_percentage(low, total);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        /// Property: histogram totals equal the number of ages
        #[test]
        fn prop_age_histogram_conserves_count(ages in prop::collection::vec(1i32..=120, 0..200)) {
            let total: i64 = age_histogram(&ages).iter().map(|b| b.total).sum();
            prop_assert_eq!(total, ages.len() as i64);
        }

        /// Property: mean BMI lies between the smallest and largest computable value
        #[test]
        fn prop_mean_bmi_bounded(bmis in prop::collection::vec(10.0f64..60.0, 1..50)) {
            let mean = mean_bmi(&bmis);
            let min = bmis.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = bmis.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mean >= round_to(min, 1) - 0.05 && mean <= round_to(max, 1) + 0.05);
        }
    }
}
