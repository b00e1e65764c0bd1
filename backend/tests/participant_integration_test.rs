//! Integration tests for participant endpoints

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_and_get_participant() {
    let app = common::TestApp::new().await;
    let id = app.create_participant("student", "female", 21).await;

    let (status, response) = app.get(&format!("/api/v1/participants/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["id"], id);
    assert_eq!(response["age"], 21);
    assert_eq!(response["participant_type"], "student");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_email_conflicts() {
    let app = common::TestApp::new().await;
    let email = format!("{}@campus.example", uuid::Uuid::new_v4().simple());
    let body = json!({
        "name": "Rita Moura",
        "email": email,
        "age": 34,
        "sex": "female",
        "participant_type": "staff",
        "department": "Library"
    });

    let (status, _) = app.post("/api/v1/participants", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same address with different casing
    let mut again = body.clone();
    again["email"] = json!(email.to_uppercase());
    let (status, response) = app.post("/api/v1/participants", &again.to_string()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_participant() {
    let app = common::TestApp::new().await;
    let id = app.create_participant("resident", "male", 47).await;

    let body = json!({
        "name": "Joao Pereira",
        "email": format!("{}@town.example", uuid::Uuid::new_v4().simple()),
        "age": 48,
        "sex": "male",
        "participant_type": "resident"
    });
    let (status, response) = app
        .put(&format!("/api/v1/participants/{}", id), &body.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["age"], 48);
    assert_eq!(response["name"], "Joao Pereira");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_participant_cascades() {
    let app = common::TestApp::new().await;
    let id = app.create_participant("student", "male", 19).await;
    app.submit_questionnaire(&id, common::moderate_answers()).await;

    let barrier = json!({"category": "time", "description": "Exam season", "intensity": 4});
    let (status, _) = app
        .post(&format!("/api/v1/participants/{}/barriers", id), &barrier.to_string())
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.delete(&format!("/api/v1/participants/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("deleted"));

    let (status, _) = app.get(&format!("/api/v1/participants/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&format!("/api/v1/participants/{}/questionnaire", id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, response) = app
        .get(&format!("/api/v1/participants/{}/barriers", id))
        .await;
    assert_eq!(response, "[]");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_unknown_participant() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .delete(&format!("/api/v1/participants/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_participants_search_and_filter() {
    let app = common::TestApp::new().await;
    let marker = uuid::Uuid::new_v4().simple().to_string();
    let body = json!({
        "name": "Clara Nunes",
        "email": format!("clara.{}@campus.example", marker),
        "age": 22,
        "sex": "female",
        "participant_type": "student",
        "course": "Nursing"
    });
    let (status, _) = app.post("/api/v1/participants", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app
        .get(&format!("/api/v1/participants?search={}&participant_type=student", marker))
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["total_count"], 1);
    assert_eq!(response["items"][0]["course"], "Nursing");
    assert_eq!(response["has_more"], false);

    let (_, response) = app
        .get(&format!("/api/v1/participants?search={}&participant_type=staff", marker))
        .await;
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["total_count"], 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_participants_clamps_limit() {
    let app = common::TestApp::new().await;

    let (status, response) = app.get("/api/v1/participants?limit=1000").await;

    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["limit"], 100);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_barrier_for_unknown_participant() {
    let app = common::TestApp::new().await;
    let barrier = json!({"category": "financial", "description": "Gym fees", "intensity": 3});

    let (status, _) = app
        .post(
            &format!("/api/v1/participants/{}/barriers", uuid::Uuid::new_v4()),
            &barrier.to_string(),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
