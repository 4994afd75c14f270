pub mod config;
pub mod content;
pub mod records;

pub use config::{
    AdminCredential, RateLimitSection, ServerSection, SiteConfig, SiteSection, StorageSection,
    CONFIG_FILE,
};
pub use content::{ContentBlock, QaEntry};
pub use records::{
    AboutInput, BannerInput, CaseCategory, CaseDetail, CaseInput, CaseSummary, CategoryRef,
    GuideStepInput, Interview, LocationInput, PressInput, ProgressInput, ProgressStage,
    QuoteAttachment, QuoteRecord, QuoteRequest, Resource, SitemapEntry,
};
