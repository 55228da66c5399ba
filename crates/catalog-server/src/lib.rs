//! Product Catalog Server
//!
//! Serves the product entry form, accepts product submissions with an
//! optional image, and lists stored products as JSON. The storage backend is
//! chosen at startup: MongoDB, MySQL, or in-memory.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod storage;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use catalog_core::ProductStore;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use upload::{UploadStore, PUBLIC_PREFIX};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub uploads: Arc<UploadStore>,
}

/// Build the full application router
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let uploads_dir = state.uploads.dir().to_path_buf();

    Router::new()
        .route("/", get(handlers::form::form))
        .route("/products", post(handlers::products::create))
        .route("/items", get(handlers::products::list))
        .route("/health", get(handlers::health))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
