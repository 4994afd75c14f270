//! Admin service - guarded content mutations and image uploads

use super::auth_guard::{AuthGuard, Identity};
use super::blob_store::{upload_file_name, BlobStore};
use super::error::{ServiceError, ServiceResult};
use super::record_store::RecordStore;
use crate::models::Resource;
use crate::validator::validate_resource;
use serde_json::Value;
use std::sync::Arc;

pub struct AdminService {
    store: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    guard: Arc<dyn AuthGuard>,
}

impl AdminService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        guard: Arc<dyn AuthGuard>,
    ) -> Self {
        Self {
            store,
            blobs,
            guard,
        }
    }

    async fn authorize(&self, credential: Option<&str>) -> ServiceResult<Identity> {
        Ok(self.guard.require_admin(credential).await?)
    }

    /// Validate and insert a record, returning its new id
    pub async fn create(
        &self,
        credential: Option<&str>,
        resource: Resource,
        body: Value,
    ) -> ServiceResult<String> {
        let identity = self.authorize(credential).await?;
        let record = validate_resource(resource, body)?;

        let stored = self.store.insert(resource.table(), record).await?;
        let id = stored
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        tracing::info!(resource = %resource, id = %id, user_id = %identity.user_id, "Created record");
        Ok(id)
    }

    /// Validate and merge a record update
    pub async fn update(
        &self,
        credential: Option<&str>,
        resource: Resource,
        id: &str,
        body: Value,
    ) -> ServiceResult<()> {
        let identity = self.authorize(credential).await?;
        let mut patch = validate_resource(resource, body)?;

        // Guide steps keep their position; only the text is editable
        if resource == Resource::Guide {
            if let Some(fields) = patch.as_object_mut() {
                fields.remove("step_number");
            }
        }

        self.store.update(resource.table(), id, patch).await?;
        tracing::info!(resource = %resource, id, user_id = %identity.user_id, "Updated record");
        Ok(())
    }

    pub async fn delete(
        &self,
        credential: Option<&str>,
        resource: Resource,
        id: &str,
    ) -> ServiceResult<()> {
        let identity = self.authorize(credential).await?;
        self.store.delete(resource.table(), id).await?;
        tracing::info!(resource = %resource, id, user_id = %identity.user_id, "Deleted record");
        Ok(())
    }

    /// Store an uploaded image at `<bucket>/<generated name>` and return its URL
    pub async fn upload_image(
        &self,
        credential: Option<&str>,
        bucket: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> ServiceResult<String> {
        let identity = self.authorize(credential).await?;
        if bytes.is_empty() {
            return Err(ServiceError::InvalidAttachment("file is empty".to_string()));
        }

        let path = format!("{}/{}", bucket, upload_file_name(file_name));
        let url = self.blobs.store(bucket, &path, bytes).await?;
        tracing::info!(bucket, url = %url, user_id = %identity.user_id, "Uploaded image");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminCredential;
    use crate::services::auth_guard::{AuthError, StaticTokenGuard};
    use crate::services::blob_store::FsBlobStore;
    use crate::services::record_store::MemoryStore;
    use serde_json::json;
    use tempfile::TempDir;

    const ADMIN: Option<&str> = Some("admin-token");

    fn service(temp: &TempDir) -> (AdminService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let blobs = Arc::new(FsBlobStore::new(
            temp.path(),
            "https://sangsaengbridge.com/uploads",
        ));
        let guard = Arc::new(StaticTokenGuard::new(&[
            AdminCredential {
                token: "admin-token".to_string(),
                user_id: "admin".to_string(),
                role: "admin".to_string(),
            },
            AdminCredential {
                token: "viewer-token".to_string(),
                user_id: "viewer".to_string(),
                role: "viewer".to_string(),
            },
        ]));
        (AdminService::new(store.clone(), blobs, guard), store)
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp);
        let body = json!({ "title": "Featured" });

        let err = service
            .create(None, Resource::Press, body.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Auth(AuthError::MissingCredential)));

        let err = service
            .create(Some("viewer-token"), Resource::Press, body)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Auth(AuthError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_validates_and_inserts() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp);

        let err = service
            .create(ADMIN, Resource::Press, json!({ "title": "" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let id = service
            .create(ADMIN, Resource::Press, json!({ "title": "Featured", "summary": "" }))
            .await
            .unwrap();
        let row = store.get("press", &id).await.unwrap().unwrap();
        assert_eq!(row["title"], "Featured");
        assert!(row["summary"].is_null());
    }

    #[tokio::test]
    async fn test_guide_update_keeps_step_number() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp);
        let id = service
            .create(ADMIN, Resource::Guide, json!({ "step_number": 2, "title": "Sample" }))
            .await
            .unwrap();

        service
            .update(
                ADMIN,
                Resource::Guide,
                &id,
                json!({ "step_number": 5, "title": "Sampling", "description": "Review" }),
            )
            .await
            .unwrap();

        let row = store.get("guide_steps", &id).await.unwrap().unwrap();
        assert_eq!(row["step_number"], 2);
        assert_eq!(row["title"], "Sampling");
        assert_eq!(row["description"], "Review");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp);

        let err = service
            .update(ADMIN, Resource::Press, "missing", json!({ "title": "x" }))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .delete(ADMIN, Resource::Press, "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp);
        let id = service
            .create(ADMIN, Resource::Press, json!({ "title": "Featured" }))
            .await
            .unwrap();

        service.delete(ADMIN, Resource::Press, &id).await.unwrap();
        assert!(store.get("press", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_image() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp);

        let url = service
            .upload_image(ADMIN, "banners", "hero.PNG", b"png")
            .await
            .unwrap();
        assert!(url.starts_with("https://sangsaengbridge.com/uploads/banners/banners/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        assert!(temp.path().join("banners").join("banners").join(name).exists());

        let err = service
            .upload_image(ADMIN, "banners", "empty.png", b"")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAttachment(_)));
    }

    #[tokio::test]
    async fn test_uploaded_image_attaches_to_banner() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp);

        let url = service
            .upload_image(ADMIN, "banners", "hero.jpg", b"jpg")
            .await
            .unwrap();
        let id = service
            .create(ADMIN, Resource::Banners, json!({ "image_url": url }))
            .await
            .unwrap();

        let row = store.get("banners", &id).await.unwrap().unwrap();
        assert_eq!(row["image_url"], url.as_str());
    }

    #[tokio::test]
    async fn test_update_clears_optional_fields() {
        let temp = TempDir::new().unwrap();
        let (service, store) = service(&temp);
        let id = service
            .create(
                ADMIN,
                Resource::Banners,
                json!({ "image_url": "https://x/a.png", "link_url": "https://x/promo" }),
            )
            .await
            .unwrap();

        service
            .update(
                ADMIN,
                Resource::Banners,
                &id,
                json!({ "image_url": "https://x/a.png", "link_url": "" }),
            )
            .await
            .unwrap();

        let row = store.get("banners", &id).await.unwrap().unwrap();
        assert!(row["link_url"].is_null());
        assert_eq!(row["image_url"], "https://x/a.png");
    }
}
