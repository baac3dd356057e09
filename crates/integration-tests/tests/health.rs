//! Integration tests for health endpoints.

use axum::http::StatusCode;

use favorites_integration_tests::{Auth, TestApp};

#[tokio::test]
async fn test_health_is_ok_without_provisioning() {
    let app = TestApp::new();

    let resp = app.get("/health", &Auth::none()).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text, "ok");
    assert!(resp.identity_set_cookie().is_none());
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_readiness_reflects_store() {
    let app = TestApp::new();

    assert_eq!(app.get("/health/ready", &Auth::none()).await.status, StatusCode::OK);

    app.store.set_unavailable(true);
    let resp = app.get("/health/ready", &Auth::none()).await;
    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let resp = app.get("/health", &Auth::none()).await;

    assert!(resp.headers.contains_key("x-request-id"));
}
