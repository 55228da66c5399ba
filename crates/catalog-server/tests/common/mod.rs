#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use catalog_core::{CatalogError, NewProduct, Product, ProductStore};
use catalog_server::storage::MemoryStore;
use catalog_server::upload::UploadStore;
use catalog_server::{build_router, AppState};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----catalog-test-boundary";
pub const TEST_BODY_LIMIT: usize = 1024 * 1024;

/// A router wired to a throwaway uploads directory
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn ProductStore>,
    pub uploads_dir: TempDir,
}

/// Build the app on top of a fresh in-memory store
pub fn build_test_app() -> TestApp {
    build_test_app_with(Arc::new(MemoryStore::new()))
}

pub fn build_test_app_with(store: Arc<dyn ProductStore>) -> TestApp {
    let uploads_dir = tempfile::tempdir().unwrap();
    let state = AppState {
        store: store.clone(),
        uploads: Arc::new(UploadStore::new(uploads_dir.path())),
    };

    TestApp {
        router: build_router(state, TEST_BODY_LIMIT),
        store,
        uploads_dir,
    }
}

/// Store whose every operation fails like an unreachable database
pub struct FailingStore;

#[async_trait]
impl ProductStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn ping(&self) -> catalog_core::Result<()> {
        Err(CatalogError::Connection("connection refused".to_string()))
    }

    async fn create_product(&self, _product: NewProduct) -> catalog_core::Result<Product> {
        Err(CatalogError::Database("connection refused".to_string()))
    }

    async fn list_products(&self) -> catalog_core::Result<Vec<Product>> {
        Err(CatalogError::Database("connection refused".to_string()))
    }
}

pub fn mango_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Mango"),
        ("price", "50"),
        ("category", "Fruit"),
        ("shopkeeper", "Raju"),
        ("location", "Market1"),
    ]
}

pub fn without(fields: &[(&'static str, &'static str)], skip: &str) -> Vec<(&'static str, &'static str)> {
    fields.iter().filter(|(k, _)| *k != skip).cloned().collect()
}

/// Encode text fields and an optional `(field, file name, bytes)` part
pub fn multipart_body(
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (name, file_name, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn post_multipart(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, files)))
        .unwrap()
}

pub fn post_urlencoded(fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn post_json(json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// GET /items as a JSON array
pub async fn list_items(app: &Router) -> Vec<serde_json::Value> {
    let response = get(app, "/items").await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await.as_array().unwrap().clone()
}
