//! Quote service - public quote request submission
//!
//! Checks run in a fixed order: rate limit, honeypot, field validation,
//! attachment upload, then the insert into `quotes`.

use super::blob_store::{upload_file_name, BlobStore};
use super::error::{ServiceError, ServiceResult};
use super::rate_limiter::RateLimiter;
use super::record_store::{RecordStore, StoreError};
use crate::models::{QuoteAttachment, QuoteRecord, QuoteRequest};
use crate::validator::{is_spam, validate_quote};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use std::sync::Arc;

pub const QUOTES_TABLE: &str = "quotes";
pub const QUOTE_BUCKET: &str = "uploads";
const QUOTE_FOLDER: &str = "quotes";

/// Result of an accepted quote request
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuoteReceipt {
    pub id: String,
    pub file_url: Option<String>,
}

pub struct QuoteService {
    store: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    limiter: Arc<RateLimiter>,
}

impl QuoteService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            store,
            blobs,
            limiter,
        }
    }

    /// Submit a quote request on behalf of `client` (the caller's address)
    pub async fn submit(&self, client: &str, request: QuoteRequest) -> ServiceResult<QuoteReceipt> {
        let decision = self.limiter.check(client);
        if !decision.allowed {
            tracing::warn!(client, "Quote request rate limited");
            return Err(ServiceError::RateLimited);
        }

        if is_spam(&request) {
            tracing::warn!(client, "Quote request rejected by honeypot");
            return Err(ServiceError::Spam);
        }

        let request = validate_quote(request)?;

        let file_url = match &request.attachment {
            Some(attachment) => self.upload_attachment(attachment).await?,
            None => None,
        };

        let record = QuoteRecord {
            name: request.name,
            contact: request.contact,
            category: request.category,
            example_product_link: request.example_product_link,
            requirements: request.requirements,
            file_url: file_url.clone(),
            ip_address: client.to_string(),
        };
        let value = serde_json::to_value(&record).map_err(StoreError::from)?;
        let stored = self.store.insert(QUOTES_TABLE, value).await?;

        let id = stored
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        tracing::info!(quote_id = %id, client, has_file = file_url.is_some(), "Quote request accepted");

        Ok(QuoteReceipt { id, file_url })
    }

    /// Upload a non-empty attachment, returning its public URL
    async fn upload_attachment(&self, attachment: &QuoteAttachment) -> ServiceResult<Option<String>> {
        let bytes = BASE64_STANDARD
            .decode(attachment.data.trim())
            .map_err(|e| ServiceError::InvalidAttachment(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(None);
        }

        let path = format!("{}/{}", QUOTE_FOLDER, upload_file_name(&attachment.file_name));
        let url = self.blobs.store(QUOTE_BUCKET, &path, &bytes).await?;
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::blob_store::FsBlobStore;
    use crate::services::record_store::{MemoryStore, Query};
    use crate::validator::ValidationErrors;
    use std::time::Duration;
    use tempfile::TempDir;

    fn request() -> QuoteRequest {
        QuoteRequest {
            name: "Kim".to_string(),
            contact: "kim@example.com".to_string(),
            category: Some(String::new()),
            requirements: Some("500 tumblers".to_string()),
            privacy_agreed: true,
            ..Default::default()
        }
    }

    fn service(temp: &TempDir, max: u32) -> (QuoteService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let blobs = Arc::new(FsBlobStore::new(temp.path(), "/uploads"));
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(60), max));
        (QuoteService::new(store.clone(), blobs, limiter), store)
    }

    #[tokio::test]
    async fn test_submit_stores_quote() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp, 5);

        let receipt = service.submit("10.0.0.1", request()).await.unwrap();
        assert!(receipt.file_url.is_none());

        let rows = store.select(QUOTES_TABLE, &Query::new()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["ip_address"], "10.0.0.1");
        assert!(rows[0]["category"].is_null());
        assert_eq!(rows[0]["id"], receipt.id.as_str());
    }

    #[tokio::test]
    async fn test_rate_limit_applies_before_validation() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp, 1);

        service.submit("10.0.0.1", request()).await.unwrap();
        let err = service
            .submit("10.0.0.1", QuoteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::RateLimited));
    }

    #[tokio::test]
    async fn test_honeypot_rejects() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp, 5);
        let mut spam = request();
        spam.honeypot = Some("buy now".to_string());

        let err = service.submit("10.0.0.2", spam).await.unwrap_err();
        assert!(matches!(err, ServiceError::Spam));
        assert!(store.select(QUOTES_TABLE, &Query::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp, 5);
        let err = service
            .submit("10.0.0.3", QuoteRequest::default())
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(ValidationErrors { errors }) => {
                assert!(errors.iter().any(|e| e.field == "name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_attachment_is_uploaded() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp, 5);
        let mut with_file = request();
        with_file.attachment = Some(QuoteAttachment {
            file_name: "drawing.pdf".to_string(),
            data: BASE64_STANDARD.encode(b"%PDF-1.4"),
        });

        let receipt = service.submit("10.0.0.4", with_file).await.unwrap();
        let url = receipt.file_url.unwrap();
        assert!(url.starts_with("/uploads/uploads/quotes/"));
        assert!(url.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_empty_attachment_is_ignored() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp, 5);
        let mut with_file = request();
        with_file.attachment = Some(QuoteAttachment {
            file_name: "empty.txt".to_string(),
            data: String::new(),
        });

        let receipt = service.submit("10.0.0.5", with_file).await.unwrap();
        assert!(receipt.file_url.is_none());
    }

    #[tokio::test]
    async fn test_bad_base64_is_rejected() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp, 5);
        let mut with_file = request();
        with_file.attachment = Some(QuoteAttachment {
            file_name: "x.bin".to_string(),
            data: "***".to_string(),
        });

        let err = service.submit("10.0.0.6", with_file).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAttachment(_)));
    }
}
