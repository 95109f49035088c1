//! Integration tests for the HTTP API with a trained classifier

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use email_triage::classifier::dataset::LabeledEmail;
use email_triage::classifier::tfidf::TfidfParams;
use email_triage::classifier::EmailClassifier;
use email_triage::config::MaskingConfig;
use email_triage::masking::MaskingEngine;
use email_triage::server::{router, AppState};
use email_triage::service::TriageService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn training_set() -> Vec<LabeledEmail> {
    let mut samples = Vec::new();
    for filler in ["today", "again", "morning", "monday", "friday"] {
        samples.push(LabeledEmail {
            text: format!("card charge refund billing {filler}"),
            category: "Request".to_string(),
        });
        samples.push(LabeledEmail {
            text: format!("server outage crash error {filler}"),
            category: "Incident".to_string(),
        });
    }
    samples
}

fn app() -> Router {
    let classifier = EmailClassifier::fit(
        &training_set(),
        TfidfParams {
            max_features: 5000,
            min_df: 1,
            max_df: 1.0,
        },
    )
    .unwrap();
    let engine = MaskingEngine::new(&MaskingConfig::default()).unwrap();
    let service = TriageService::new(Arc::new(engine), Arc::new(classifier));
    router(AppState { service })
}

async fn post_email(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/classify_email")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_classify_email_end_to_end() {
    let email = "Hi,\n\nmy card 4111 1111 1111 1111 got a double charge, please refund.\nThanks, John Smith";
    let (status, json) = post_email(app(), json!({ "email_body": email })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["input_email_body"], email);
    assert_eq!(json["category_of_the_email"], "Request");

    let masked = json["masked_email"].as_str().unwrap();
    assert!(!masked.contains("4111"));
    assert!(!masked.contains("John Smith"));
    assert!(masked.ends_with("Thanks, [full_name]"));

    let entities = json["list_of_masked_entities"].as_array().unwrap();
    let starts: Vec<u64> = entities
        .iter()
        .map(|e| e["position"][0].as_u64().unwrap())
        .collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    assert!(entities.iter().any(|e| e["classification"] == "full_name"
        && e["entity"] == "John Smith"));
}

#[tokio::test]
async fn test_positions_are_character_offsets() {
    let email = "Grüße, write to jürgen@example.com or ops@example.com";
    let (status, json) = post_email(app(), json!({ "email_body": email })).await;

    assert_eq!(status, StatusCode::OK);
    let entity = &json["list_of_masked_entities"][0];
    assert_eq!(entity["entity"], "ops@example.com");
    assert_eq!(entity["position"], json!([38, 53]));
}

#[tokio::test]
async fn test_empty_body_is_accepted() {
    let (status, json) = post_email(app(), json!({ "email_body": "" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["masked_email"], "");
    assert_eq!(json["list_of_masked_entities"], json!([]));
}

#[tokio::test]
async fn test_wrong_field_type_rejected() {
    let (status, _) = post_email(app(), json!({ "email_body": 42 })).await;
    assert!(status.is_client_error());
}
