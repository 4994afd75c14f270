use super::auth_guard::AuthError;
use super::blob_store::BlobError;
use super::record_store::StoreError;
use crate::validator::ValidationErrors;

/// Errors surfaced by the site services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Too many requests. Please try again shortly.")]
    RateLimited,

    #[error("Detected as spam")]
    Spam,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),

    #[error("Failed to upload file: {0}")]
    Upload(#[from] BlobError),

    #[error("Failed to save record: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// True for a store lookup that found no record
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound(_) | ServiceError::Store(StoreError::NotFound { .. })
        )
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
