//! Image upload storage
//!
//! Files land in a single public directory as `<epoch-millis>-<original name>`
//! and are served back under [`PUBLIC_PREFIX`]. A name already taken gets a
//! counter after the timestamp: `<epoch-millis>-<n>-<original name>`.

use axum::extract::multipart::MultipartError;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// URL prefix the uploads directory is mounted at
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Multipart field that carries the product image
pub const IMAGE_FIELD: &str = "image";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read upload body: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("Unexpected file field: {0}")]
    UnexpectedFile(String),
}

/// A file written to the uploads directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub file_name: String,
    pub path: PathBuf,
    /// Path clients use to fetch the file, e.g. `/uploads/1700000000000-mango.png`
    pub public_path: String,
}

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if it is missing
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        info!("Uploads directory ready: {}", self.dir.display());
        Ok(())
    }

    /// Stream `body` into a fresh file named after `original_name`.
    ///
    /// The file is opened with create-new semantics, so concurrent uploads of
    /// the same name in the same millisecond get distinct names instead of
    /// overwriting each other. A body that fails mid-stream leaves no file
    /// behind.
    pub async fn store<S, E>(&self, original_name: &str, body: S) -> Result<StoredUpload, UploadError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<UploadError>,
    {
        let original = sanitize_file_name(original_name);
        let (file_name, path, mut file) = self.create_unique(&original).await?;

        match write_body(&mut file, body).await {
            Ok(size) => {
                debug!("Stored upload {} ({} bytes)", path.display(), size);
                Ok(StoredUpload {
                    public_path: format!("{}/{}", PUBLIC_PREFIX, file_name),
                    file_name,
                    path,
                })
            }
            Err(e) => {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                Err(e)
            }
        }
    }

    async fn create_unique(&self, original: &str) -> Result<(String, PathBuf, File), UploadError> {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut file_name = upload_file_name(millis, original);
        let mut counter = 0u64;

        loop {
            let path = self.dir.join(&file_name);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((file_name, path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    counter += 1;
                    debug!("Upload name {} taken, trying suffix {}", file_name, counter);
                    file_name = format!("{}-{}-{}", millis, counter, original);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

async fn write_body<S, E>(file: &mut File, body: S) -> Result<u64, UploadError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<UploadError>,
{
    futures::pin_mut!(body);

    let mut size = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(Into::<UploadError>::into)?;
        file.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(size)
}

pub fn upload_file_name(millis: i64, original: &str) -> String {
    format!("{}-{}", millis, original)
}

/// Keep only the final path component of a client-supplied file name
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    match base {
        "" | "." | ".." => "upload".to_string(),
        other => other.to_string(),
    }
}
