//! Service layer for the site
//!
//! Public reads, quote submission and admin mutations live here. The
//! services talk to storage and auth only through the [`RecordStore`],
//! [`BlobStore`] and [`AuthGuard`] traits so the HTTP layer and tests can
//! swap implementations.

pub mod admin_service;
pub mod auth_guard;
pub mod blob_store;
pub mod content_service;
pub mod error;
pub mod quote_service;
pub mod rate_limiter;
pub mod record_store;

// Re-export commonly used types
pub use admin_service::AdminService;
pub use auth_guard::{bearer_token, AuthError, AuthGuard, Identity, StaticTokenGuard};
pub use blob_store::{upload_file_name, BlobError, BlobStore, FsBlobStore};
pub use content_service::ContentService;
pub use error::{ServiceError, ServiceResult};
pub use quote_service::{QuoteReceipt, QuoteService};
pub use rate_limiter::{RateLimitDecision, RateLimiter};
pub use record_store::{MemoryStore, Query, Record, RecordStore, SortOrder, StoreError};
