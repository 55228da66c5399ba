//! Integration tests for the health endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use catalog_core::ProductStore;
use common::{body_json, build_test_app, build_test_app_with, get, FailingStore};

#[tokio::test]
async fn health_reports_backend() {
    let app = build_test_app();
    let response = get(&app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "memory");
}

#[tokio::test]
async fn health_is_unavailable_when_storage_is_down() {
    let app = build_test_app_with(Arc::new(FailingStore));
    let response = get(&app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unavailable");
    assert_eq!(json["storage"], "failing");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app();
    let response = get(&app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_is_shared_with_router() {
    let app = build_test_app();
    assert!(app.store.list_products().await.unwrap().is_empty());
}
