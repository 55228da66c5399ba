//! Product handlers

use crate::error::AppResult;
use crate::extractors::ProductSubmission;
use crate::AppState;
use axum::{extract::State, response::Html, Json};
use catalog_core::Product;
use tracing::info;

pub const CREATED_HTML: &str =
    r#"<h1>Product Added Successfully!</h1><a href="/">Add Another Product</a>"#;

/// POST /products
///
/// The image (if any) is already on disk when this runs. A rejected
/// submission or a failed insert leaves that file in place.
pub async fn create(
    State(state): State<AppState>,
    submission: ProductSubmission,
) -> AppResult<Html<&'static str>> {
    let image = submission.image.map(|upload| upload.public_path);
    let product = submission.draft.into_new_product(image)?;

    let product = state.store.create_product(product).await?;
    info!("Created product {} ({})", product.id, product.name);

    Ok(Html(CREATED_HTML))
}

/// GET /items
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.store.list_products().await?;
    Ok(Json(products))
}
