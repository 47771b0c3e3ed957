mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use common::{TestApp, assert_status, body_json, header_str};

fn public(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn liveness_is_public() {
    let app = TestApp::new();
    assert_status(&app.send(public("/health/live")).await, StatusCode::OK);
}

#[tokio::test]
async fn health_without_pool_reports_degraded() {
    let app = TestApp::new();

    let response = app.send(public("/health")).await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "degraded");
    assert_eq!(body["version"], wishstore::pkg_version());

    let response = app.send(public("/health/ready")).await;
    assert_status(&response, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let app = TestApp::new();

    let request = Request::get("/api/wishes")
        .header("x-request-id", "trace-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_eq!(header_str(&response, "x-request-id"), "trace-123");
    assert_eq!(body_json(response).await["request_id"], "trace-123");
}

#[tokio::test]
async fn openapi_document_describes_resources() {
    let app = TestApp::new();

    let response = app.send(public("/api-docs/openapi.json")).await;
    assert_status(&response, StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/wishes"]["post"].is_object());
    assert!(doc["paths"]["/api/wishes/{id}"]["delete"].is_object());
    assert!(doc["paths"]["/api/wishlists/mine"]["get"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearerAuth"].is_object());
}

#[tokio::test]
async fn slow_requests_time_out_with_408() {
    let app = TestApp::with_timeout(Duration::from_millis(50));
    app.store.set_latency(Duration::from_millis(500));

    let response = app.get("/api/wishes/1").await;
    assert_status(&response, StatusCode::REQUEST_TIMEOUT);
    assert!(!header_str(&response, "x-request-id").is_empty());
}
