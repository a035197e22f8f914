//! Tests for the chat orchestrator's failure policy: valid model replies pass
//! through, everything else degrades to the deterministic fallback, and the
//! endpoint never returns an HTTP error.

use axum::http::StatusCode;
use gym_trainer_core::domain::Profile;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

use common::{
    body_json, create_test_app, create_test_app_with_model, json_post, MockAdviceModel,
    ScriptedReply,
};

const VALID_REPLY: &str = r#"{"response":"Model summary","advice":"Model advice","workout_plan":["Day 1: squats"],"nutrition_tips":"Model tips","macros":{"protein":150,"carbs":200,"fats":50}}"#;

async fn seed_profile(state: &api_lib::web::state::AppState, weight_kg: f64) -> Uuid {
    let user_id = Uuid::new_v4();
    state
        .db
        .upsert_profile(&Profile {
            user_id,
            age: 30,
            height_cm: 175.0,
            weight_kg,
            sex: "male".to_string(),
            activity_level: "moderate".to_string(),
            goal: "Muscle Gain".to_string(),
        })
        .await
        .unwrap();
    user_id
}

#[tokio::test]
async fn test_chat_without_profile_returns_incomplete_payload() {
    let model = Arc::new(MockAdviceModel::new(ScriptedReply::Text(
        VALID_REPLY.to_string(),
    )));
    let (app, _state) = create_test_app_with_model(model.clone());

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": Uuid::new_v4(), "message": "anything"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("complete your profile"));
    assert_eq!(body["macros"], json!({"protein": 0.0, "carbs": 0.0, "fats": 0.0}));
    // The gate fires before any prompt is built, so the model is never consulted.
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_chat_valid_model_reply_passes_through() {
    let (app, state) = create_test_app(ScriptedReply::Text(VALID_REPLY.to_string()));
    let user_id = seed_profile(&state, 80.0).await;

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": user_id, "message": "plan my week"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["response"], "Model summary");
    assert_eq!(body["workout_plan"], json!(["Day 1: squats"]));
    assert_eq!(body["macros"]["protein"], 150.0);
}

#[tokio::test]
async fn test_chat_accepts_code_fenced_reply() {
    let fenced = format!("```json\n{}\n```", VALID_REPLY);
    let (app, state) = create_test_app(ScriptedReply::Text(fenced));
    let user_id = seed_profile(&state, 80.0).await;

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": user_id, "message": "plan my week"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["response"], "Model summary");
}

#[tokio::test]
async fn test_chat_reply_missing_field_falls_back() {
    // workout_plan key is absent; the partial payload must not leak through.
    let partial = r#"{"response":"r","advice":"a","nutrition_tips":"n","macros":{"protein":1,"carbs":2,"fats":3}}"#;
    let (app, state) = create_test_app(ScriptedReply::Text(partial.to_string()));
    let user_id = seed_profile(&state, 80.0).await;

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": user_id, "message": "best gym workout"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // The strength template, derived from the stored 80 kg weight.
    assert!(body["response"].as_str().unwrap().contains("workout plan"));
    assert_eq!(body["macros"], json!({"protein": 160.0, "carbs": 240.0, "fats": 80.0}));
}

#[tokio::test]
async fn test_chat_prose_reply_falls_back() {
    let (app, state) = create_test_app(ScriptedReply::Text(
        "Sure, here's my advice: eat well and lift often.".to_string(),
    ));
    let user_id = seed_profile(&state, 70.0).await;

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": user_id, "message": "how do I bulk"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("Muscle building program"));
}

#[tokio::test]
async fn test_chat_model_error_falls_back_not_500() {
    let (app, state) = create_test_app(ScriptedReply::Error);
    let user_id = seed_profile(&state, 80.0).await;

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": user_id, "message": "I want to lose weight and build muscle"}),
        ))
        .await
        .unwrap();
    // Chat failures never surface as HTTP errors.
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // Keyword priority: the cutting template wins over bulking.
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("Weight loss strategy"));
    assert_eq!(body["macros"]["protein"], 160.0);
}

#[tokio::test]
async fn test_chat_fallback_has_all_five_fields() {
    let (app, state) = create_test_app(ScriptedReply::Error);
    let user_id = seed_profile(&state, 80.0).await;

    let response = app
        .oneshot(json_post(
            "/chat",
            json!({"user_id": user_id, "message": "completely unrelated question"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    for field in ["response", "advice", "workout_plan", "nutrition_tips", "macros"] {
        assert!(body.get(field).is_some(), "missing field {}", field);
    }
    assert!(!body["workout_plan"].as_array().unwrap().is_empty());
}
