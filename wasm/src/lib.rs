//! Sedentarism Study WASM Module
//!
//! Browser bindings for the questionnaire and BMI calculators. Every
//! function delegates to `sedentarism-shared`, so a preview in the form
//! matches what the backend stores.

use sedentarism_shared::health_metrics;
use sedentarism_shared::ipaq;
use wasm_bindgen::prelude::*;

/// Total MET-minutes/week for the six IPAQ answers
#[wasm_bindgen]
pub fn score_activity(
    vigorous_days: u32,
    vigorous_minutes: u32,
    moderate_days: u32,
    moderate_minutes: u32,
    walking_days: u32,
    walking_minutes: u32,
) -> f64 {
    ipaq::calculate_total_met(
        vigorous_days,
        vigorous_minutes,
        moderate_days,
        moderate_minutes,
        walking_days,
        walking_minutes,
    )
}

/// Per-intensity MET-minutes/week as a JSON object
#[wasm_bindgen]
pub fn activity_breakdown(
    vigorous_days: u32,
    vigorous_minutes: u32,
    moderate_days: u32,
    moderate_minutes: u32,
    walking_days: u32,
    walking_minutes: u32,
) -> Result<String, JsValue> {
    let breakdown = ipaq::met_breakdown(
        vigorous_days,
        vigorous_minutes,
        moderate_days,
        moderate_minutes,
        walking_days,
        walking_minutes,
    );
    serde_json::to_string(&breakdown).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Activity level (`low`, `moderate` or `high`) for a MET total
#[wasm_bindgen]
pub fn classify_activity(total_met: f64) -> String {
    ipaq::classify_activity(total_met).as_str().to_string()
}

/// BMI from weight (kg) and height (m); 0 when height is not positive
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    health_metrics::calculate_bmi(weight_kg, height_m)
}

/// BMI category, or an empty string for the 0 fallback
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    health_metrics::classify_stored_bmi(bmi)
        .map(|category| category.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_activity() {
        assert_eq!(score_activity(3, 30, 2, 40, 5, 20), 1370.0);
        assert_eq!(score_activity(0, 0, 0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_activity_breakdown_json() {
        let json = activity_breakdown(3, 30, 2, 40, 5, 20).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vigorous"], 720.0);
        assert_eq!(value["moderate"], 320.0);
        assert_eq!(value["walking"], 330.0);
    }

    #[test]
    fn test_classify_activity_thresholds() {
        assert_eq!(classify_activity(599.9), "low");
        assert_eq!(classify_activity(600.0), "moderate");
        assert_eq!(classify_activity(3000.0), "high");
    }

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 1.75);
        assert!((bmi - 22.86).abs() < 0.01);
        assert_eq!(classify_bmi(bmi), "normal");
    }

    #[test]
    fn test_bmi_zero_height() {
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(classify_bmi(0.0), "");
    }
}
