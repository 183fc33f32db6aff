//! Health, liveness and OpenAPI routes.

mod helpers;

use helpers::{setup_app_with_failing_storage, setup_app_without_store, setup_test_app};
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/live").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_health_when_everything_is_ready() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "healthy");
    assert_eq!(body["metadata_store"], "ready");
}

#[tokio::test]
async fn test_health_reports_missing_store_credential() {
    let app = setup_app_without_store().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    let store = body["metadata_store"].as_str().unwrap();
    assert!(store.starts_with("unavailable: "));
    assert!(store.contains("FIREBASE_SERVICE_ACCOUNT"));
}

#[tokio::test]
async fn test_health_reports_storage_failure() {
    let app = setup_app_with_failing_storage().await;

    let body: Value = app.client().get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert!(body["storage"].as_str().unwrap().starts_with("unhealthy: "));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/upload-documents"]["post"].is_object());
    assert!(body["paths"]["/get-documents"]["get"].is_object());
}
