//! Blob store seam for uploaded images and quote attachments

use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Errors that can occur while storing a blob
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Binary object storage that hands back a public URL
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path` inside `bucket` and return its public URL
    async fn store(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String, BlobError>;
}

/// Generate a collision-resistant upload name, keeping the original extension
///
/// `photo.JPG` becomes something like `1718000000000-3f9a2c1.jpg`.
pub fn upload_file_name(original: &str) -> String {
    let stamp = Utc::now().timestamp_millis();
    let random: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();

    let extension = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase());

    match extension {
        Some(ext) => format!("{}-{}.{}", stamp, random, ext),
        None => format!("{}-{}", stamp, random),
    }
}

/// Reject absolute paths and any `..` or root components
fn validate_relative(path: &str) -> Result<PathBuf, BlobError> {
    if path.is_empty() || path.contains('\\') {
        return Err(BlobError::InvalidPath(path.to_string()));
    }

    let relative = PathBuf::from(path);
    let all_normal = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !all_normal {
        return Err(BlobError::InvalidPath(path.to_string()));
    }

    Ok(relative)
}

/// Stores blobs on the local filesystem under `<root>/<bucket>/<path>`
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn store(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let bucket_dir = validate_relative(bucket)?;
        let relative = validate_relative(path)?;

        let target = self.root.join(&bucket_dir).join(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    BlobError::AlreadyExists(format!("{}/{}", bucket, path))
                }
                _ => BlobError::Io(e),
            })?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::info!(bucket, path, size = bytes.len(), "Stored upload");
        Ok(format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            bucket,
            path
        ))
    }
}
