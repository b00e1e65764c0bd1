//! Integration tests for statistics and export endpoints
//!
//! Aggregates are global, so this binary holds a single test that
//! truncates and seeds its own dataset.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

fn bucket<'a>(buckets: &'a Value, key: &str) -> &'a Value {
    buckets
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["key"] == key)
        .unwrap_or_else(|| panic!("missing bucket {}", key))
}

async fn seed(app: &common::TestApp) {
    let active = app.create_participant("student", "female", 20).await;
    let inactive = app.create_participant("staff", "male", 40).await;
    app.create_participant("resident", "female", 60).await;

    app.submit_questionnaire(&active, common::moderate_answers()).await;
    app.submit_questionnaire(&inactive, common::inactive_answers()).await;

    let indicators = [
        (&active, json!({"weight_kg": 70.0, "height_m": 1.75,
                         "systolic_pressure": 115, "diastolic_pressure": 75})),
        (&inactive, json!({"weight_kg": 100.0, "height_m": 1.75,
                           "systolic_pressure": 150, "diastolic_pressure": 95,
                           "has_diabetes": true, "has_hypertension": true,
                           "has_obesity": true})),
    ];
    for (id, body) in indicators {
        let (status, _) = app
            .put(&format!("/api/v1/participants/{}/health-indicators", id), &body.to_string())
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let barriers = [
        (&active, json!({"category": "time", "description": "Classes all day", "intensity": 4})),
        (&inactive, json!({"category": "time", "description": "Desk job", "intensity": 2})),
        (&inactive, json!({"category": "financial", "description": "Gym fees", "intensity": 5})),
    ];
    for (id, body) in barriers {
        let (status, _) = app
            .post(&format!("/api/v1/participants/{}/barriers", id), &body.to_string())
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let strategy = json!({
        "title": "Standing breaks every hour",
        "description": "Five minute walk between lectures",
        "strategy_type": "institutional",
        "target_audience": "Students",
        "required_resources": "Timetable change",
        "implementation_timeline": "Next semester",
        "owner": "Academic office"
    });
    let (status, _) = app.post("/api/v1/strategies", &strategy.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_statistics_and_export() {
    let app = common::TestApp::new().await;
    app.cleanup().await;
    seed(&app).await;

    // Summary
    let (status, summary) = app.get("/api/v1/statistics/summary").await;
    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(summary["total_participants"], 3);
    assert_eq!(summary["total_questionnaires"], 2);
    assert_eq!(bucket(&summary["participants_by_type"], "student")["total"], 1);
    assert_eq!(bucket(&summary["activity_levels"], "low")["total"], 1);
    assert_eq!(bucket(&summary["activity_levels"], "moderate")["total"], 1);
    assert_eq!(summary["top_barriers"][0]["category"], "time");
    assert_eq!(summary["top_barriers"][0]["total"], 2);
    assert_eq!(summary["top_barriers"][0]["average_intensity"], 3.0);
    assert_eq!(summary["recent_strategies"][0]["title"], "Standing breaks every hour");

    // Results
    let (status, results) = app.get("/api/v1/statistics/results").await;
    assert_eq!(status, StatusCode::OK);
    let results: Value = serde_json::from_str(&results).unwrap();
    assert_eq!(results["total_participants"], 3);
    assert_eq!(bucket(&results["participants_by_sex"], "female")["total"], 2);
    assert_eq!(bucket(&results["age_bands"], "18-25")["total"], 1);
    assert_eq!(bucket(&results["age_bands"], "26-35")["total"], 0);
    assert_eq!(bucket(&results["age_bands"], "56+")["total"], 1);
    assert_eq!(results["sedentary_percentage"], 33.3);
    assert_eq!(results["average_bmi"], 27.8);
    assert_eq!(results["prevalence"]["diabetes"], 1);
    assert_eq!(results["prevalence"]["obesity"], 1);

    // Export
    let (status, csv) = app.get("/api/v1/export/csv/questionnaires").await;
    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("participant_type,sex,age,"));
    assert!(lines.iter().any(|l| l.ends_with(",moderate,22.86,normal")));
    assert!(lines.iter().any(|l| l.ends_with(",low,32.65,obese")));
    assert!(!csv.contains('@'));

    app.cleanup().await;
}
