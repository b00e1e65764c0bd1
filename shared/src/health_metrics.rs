//! Health metrics calculations module
//!
//! Provides Body Mass Index calculation and classification for the health
//! indicators collected from study participants.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Total**: A non-positive height yields BMI 0 instead of an error
//! 3. **Type Safety**: Categories are a closed enum, SI units throughout

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the normal BMI band
pub const BMI_NORMAL_MIN: f64 = 18.5;
/// Lower bound (inclusive) of the overweight BMI band
pub const BMI_OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound (inclusive) of the obese BMI band
pub const BMI_OBESE_MIN: f64 = 30.0;

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, BMI_NORMAL_MIN),
            BmiCategory::Normal => (BMI_NORMAL_MIN, BMI_OVERWEIGHT_MIN),
            BmiCategory::Overweight => (BMI_OVERWEIGHT_MIN, BMI_OBESE_MIN),
            BmiCategory::Obese => (BMI_OBESE_MIN, f64::INFINITY),
        }
    }

    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// BMI assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI value, 0 when not computable
    pub value: f64,
    /// BMI category, `None` when not computable
    pub category: Option<BmiCategory>,
    /// Healthy weight range in kg for this height
    pub healthy_weight_range_kg: Option<(f64, f64)>,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Returns 0 when `height_m` is not positive. Consumers must read 0 as
/// "not computable", never as a physiological value.
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    try_calculate_bmi(weight_kg, height_m).unwrap_or(0.0)
}

/// Calculate BMI, returning `None` when height is not positive
pub fn try_calculate_bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if height_m > 0.0 {
        Some(weight_kg / (height_m * height_m))
    } else {
        None
    }
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < BMI_NORMAL_MIN {
        BmiCategory::Underweight
    } else if bmi < BMI_OVERWEIGHT_MIN {
        BmiCategory::Normal
    } else if bmi < BMI_OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Classify a stored BMI, treating the 0 fallback as not computable
pub fn classify_stored_bmi(bmi: f64) -> Option<BmiCategory> {
    if bmi > 0.0 {
        Some(classify_bmi(bmi))
    } else {
        None
    }
}

/// Calculate healthy weight range for a given height
///
/// Based on BMI 18.5-25 (normal range)
pub fn healthy_weight_range_kg(height_m: f64) -> (f64, f64) {
    let height_m_sq = height_m * height_m;
    (BMI_NORMAL_MIN * height_m_sq, BMI_OVERWEIGHT_MIN * height_m_sq)
}

/// Calculate complete BMI result
pub fn assess_bmi(weight_kg: f64, height_m: f64) -> BmiResult {
    match try_calculate_bmi(weight_kg, height_m) {
        Some(bmi) => BmiResult {
            value: bmi,
            category: Some(classify_bmi(bmi)),
            healthy_weight_range_kg: Some(healthy_weight_range_kg(height_m)),
        },
        None => BmiResult {
            value: 0.0,
            category: None,
            healthy_weight_range_kg: None,
        },
    }
}

// ============================================================================
// Health Indicators
// ============================================================================

/// Health indicators as submitted for a participant
///
/// Only weight and height feed the BMI; the rest is stored unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndicators {
    pub weight_kg: f64,
    pub height_m: f64,
    pub systolic_pressure: u32,
    pub diastolic_pressure: u32,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_obesity: bool,
    pub has_cardiovascular_disease: bool,
    pub smokes: bool,
    pub consumes_alcohol: bool,
}

impl HealthIndicators {
    pub fn bmi(&self) -> f64 {
        calculate_bmi(self.weight_kg, self.height_m)
    }
}

/// Health indicators paired with the BMI derived from them
///
/// Built only through [`AssessedHealthIndicators::recompute`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssessedHealthIndicators {
    input: HealthIndicators,
    bmi: f64,
}

impl AssessedHealthIndicators {
    /// Derive BMI from `input` from scratch
    pub fn recompute(input: HealthIndicators) -> Self {
        let bmi = input.bmi();
        Self { input, bmi }
    }

    pub fn input(&self) -> &HealthIndicators {
        &self.input
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        classify_stored_bmi(self.bmi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 1.75m -> BMI 22.857...
        let bmi = calculate_bmi(70.0, 1.75);
        assert!((bmi - 22.857142857142858).abs() < 1e-9);
        assert_eq!(classify_bmi(bmi), BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_zero_height_returns_zero() {
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(70.0, -1.7), 0.0);
        assert_eq!(try_calculate_bmi(70.0, 0.0), None);
    }

    #[rstest]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.99, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    fn test_bmi_category_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[test]
    fn test_stored_zero_is_not_classified() {
        assert_eq!(classify_stored_bmi(0.0), None);
        assert_eq!(classify_stored_bmi(31.2), Some(BmiCategory::Obese));
    }

    #[test]
    fn test_assess_bmi_not_computable() {
        let result = assess_bmi(70.0, 0.0);
        assert_eq!(result.value, 0.0);
        assert!(result.category.is_none());
        assert!(result.healthy_weight_range_kg.is_none());
    }

    #[test]
    fn test_healthy_weight_range() {
        // For 1.75m, healthy range should be ~56.7-76.6 kg
        let (min, max) = healthy_weight_range_kg(1.75);
        assert!((min - 56.7).abs() < 0.5);
        assert!((max - 76.6).abs() < 0.5);
    }

    #[test]
    fn test_recompute_health_indicators() {
        let input = HealthIndicators {
            weight_kg: 80.0,
            height_m: 1.70,
            systolic_pressure: 130,
            diastolic_pressure: 85,
            has_diabetes: false,
            has_hypertension: true,
            has_obesity: true,
            has_cardiovascular_disease: false,
            smokes: false,
            consumes_alcohol: true,
        };
        let assessed = AssessedHealthIndicators::recompute(input.clone());
        assert_eq!(assessed.input(), &input);
        assert_eq!(assessed.bmi(), 80.0 / (1.70 * 1.70));
        assert_eq!(assessed.bmi_category(), Some(BmiCategory::Overweight));
    }

    #[test]
    fn test_bmi_category_serializes_snake_case() {
        let json = serde_json::to_string(&BmiCategory::Underweight).unwrap();
        assert_eq!(json, "\"underweight\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI equals weight / height² for positive heights
        #[test]
        fn prop_bmi_formula(weight in 1.0f64..500.0, height in 0.3f64..3.0) {
            prop_assert_eq!(calculate_bmi(weight, height), weight / (height * height));
        }

        /// Property: non-positive height always yields 0
        #[test]
        fn prop_bmi_zero_guard(weight in 1.0f64..500.0, height in -3.0f64..=0.0) {
            prop_assert_eq!(calculate_bmi(weight, height), 0.0);
        }

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_increases_with_weight(
            weight1 in 50.0f64..100.0,
            weight2 in 100.0f64..150.0,
            height in 1.5f64..2.0
        ) {
            prop_assert!(calculate_bmi(weight2, height) > calculate_bmi(weight1, height));
        }

        /// Property: recomputing twice gives identical results
        #[test]
        fn prop_bmi_idempotent(weight in 1.0f64..500.0, height in 0.3f64..3.0) {
            prop_assert_eq!(calculate_bmi(weight, height), calculate_bmi(weight, height));
        }

        /// Property: Healthy weight range contains weights that produce normal BMI
        #[test]
        fn prop_healthy_range_produces_normal_bmi(height in 1.5f64..2.0) {
            let (min, max) = healthy_weight_range_kg(height);
            let mid_weight = (min + max) / 2.0;
            let bmi = calculate_bmi(mid_weight, height);
            prop_assert_eq!(classify_bmi(bmi), BmiCategory::Normal);
        }
    }
}
