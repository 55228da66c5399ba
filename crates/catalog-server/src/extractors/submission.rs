//! Product submission extractor
//!
//! Reads the create-product body in whichever encoding the client used.
//! Multipart bodies pass through the upload stage first: the image is on disk
//! before any field is validated.

use crate::error::AppError;
use crate::upload::{StoredUpload, UploadError, UploadStore, IMAGE_FIELD};
use crate::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use catalog_core::ProductDraft;
use tracing::debug;

/// Raw fields plus the image the upload stage stored, if any
#[derive(Debug)]
pub struct ProductSubmission {
    pub draft: ProductDraft,
    pub image: Option<StoredUpload>,
}

#[async_trait]
impl FromRequest<AppState> for ProductSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?;
            return read_multipart(multipart, &state.uploads).await;
        }

        let draft = if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(draft) = Form::<ProductDraft>::from_request(req, state)
                .await
                .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?;
            draft
        } else if content_type.starts_with("application/json") {
            let Json(draft) = Json::<ProductDraft>::from_request(req, state)
                .await
                .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?;
            draft
        } else {
            // No parser applies, so no fields arrive and validation rejects it
            ProductDraft::default()
        };

        Ok(Self { draft, image: None })
    }
}

async fn read_multipart(
    mut multipart: Multipart,
    uploads: &UploadStore,
) -> Result<ProductSubmission, AppError> {
    let mut draft = ProductDraft::default();
    let mut image: Option<StoredUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            // Browsers send an empty file part when no file was chosen
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                if name != IMAGE_FIELD || image.is_some() {
                    return Err(UploadError::UnexpectedFile(name).into());
                }
                image = Some(uploads.store(&file_name, field).await?);
            }
            None => {
                let value = field.text().await?;
                if !draft.set_field(&name, value) {
                    debug!("Ignoring unknown form field: {}", name);
                }
            }
        }
    }

    Ok(ProductSubmission { draft, image })
}
