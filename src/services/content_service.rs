//! Content service - read access for public pages

use super::error::{ServiceError, ServiceResult};
use super::record_store::{Query, Record, RecordStore, SortOrder, StoreError};
use crate::models::{
    CaseCategory, CaseDetail, CaseSummary, CategoryRef, Interview, Resource, SitemapEntry,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Categories are managed outside the admin API
pub const CATEGORY_TABLE: &str = "case_categories";

/// Cases shown on the home page
const HOME_CASE_LIMIT: usize = 6;
/// Cases shown under "related cases" on a detail page
const RELATED_CASE_LIMIT: usize = 3;

fn decode<T: DeserializeOwned>(record: Record) -> ServiceResult<T> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| ServiceError::Store(StoreError::from(e)))
}

/// Attach `category: {name, slug}` looked up through `category_id`
fn with_category(mut record: Record, categories: &HashMap<String, CaseCategory>) -> Record {
    let category = record
        .get("category_id")
        .and_then(Value::as_str)
        .and_then(|id| categories.get(id))
        .map(CategoryRef::from)
        .and_then(|c| serde_json::to_value(c).ok())
        .unwrap_or(Value::Null);
    record.insert("category".to_string(), category);
    record
}

/// Everything the home page shows
#[derive(Debug, Clone, Serialize)]
pub struct HomeContent {
    pub banners: Vec<Record>,
    pub middle_banners: Vec<Record>,
    pub cases: Vec<CaseSummary>,
    pub progress: Vec<Record>,
    pub about: Option<Record>,
    pub guide_steps: Vec<Record>,
    pub press: Vec<Record>,
    pub locations: Vec<Record>,
}

pub struct ContentService {
    store: Arc<dyn RecordStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Active interview with the given slug
    pub async fn interview_by_slug(&self, slug: &str) -> ServiceResult<Interview> {
        let query = Query::new()
            .eq("slug", slug)
            .eq("is_active", true)
            .limit(1);
        let record = self
            .store
            .select(Resource::Interviews.table(), &query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("Interview '{}'", slug)))?;
        decode(record)
    }

    /// Active interviews in display order
    pub async fn list_interviews(&self) -> ServiceResult<Vec<Interview>> {
        let query = Query::new()
            .eq("is_active", true)
            .order_by("sort_order", SortOrder::Ascending);
        self.store
            .select(Resource::Interviews.table(), &query)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Case categories keyed by id
    async fn categories(&self) -> ServiceResult<HashMap<String, CaseCategory>> {
        self.store
            .select(CATEGORY_TABLE, &Query::new())
            .await?
            .into_iter()
            .map(|record| decode::<CaseCategory>(record).map(|c| (c.id.clone(), c)))
            .collect()
    }

    async fn select_cases<T: DeserializeOwned>(&self, query: &Query) -> ServiceResult<Vec<T>> {
        let categories = self.categories().await?;
        self.store
            .select(Resource::Cases.table(), query)
            .await?
            .into_iter()
            .map(|record| decode(with_category(record, &categories)))
            .collect()
    }

    /// Case listing, newest first
    ///
    /// `category` is a category slug; an unknown slug lists every case.
    pub async fn list_cases(&self, category: Option<&str>) -> ServiceResult<Vec<CaseSummary>> {
        let mut query = Query::new().order_by("created_at", SortOrder::Descending);
        if let Some(slug) = category {
            let categories = self.categories().await?;
            if let Some(found) = categories.values().find(|c| c.slug == slug) {
                query = query.eq("category_id", found.id.as_str());
            }
        }
        self.select_cases(&query).await
    }

    /// Newest cases for the home page
    pub async fn latest_cases(&self, limit: usize) -> ServiceResult<Vec<CaseSummary>> {
        let query = Query::new()
            .order_by("created_at", SortOrder::Descending)
            .limit(limit);
        self.select_cases(&query).await
    }

    pub async fn case_by_slug(&self, slug: &str) -> ServiceResult<CaseDetail> {
        let query = Query::new().eq("slug", slug).limit(1);
        self.select_cases::<CaseDetail>(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("Case '{}'", slug)))
    }

    /// Other cases in the same category; none when the case has no category
    pub async fn related_cases(&self, case: &CaseDetail) -> ServiceResult<Vec<CaseSummary>> {
        let Some(category_id) = &case.category_id else {
            return Ok(Vec::new());
        };

        let query = Query::new()
            .eq("category_id", category_id.as_str())
            .order_by("created_at", SortOrder::Descending);
        let mut related: Vec<CaseSummary> = self.select_cases(&query).await?;
        related.retain(|c| c.id != case.id);
        related.truncate(RELATED_CASE_LIMIT);
        Ok(related)
    }

    /// Rows of a home page section in display order
    pub async fn section(&self, resource: Resource) -> ServiceResult<Vec<Record>> {
        let query = match resource {
            Resource::Banners | Resource::MiddleBanners => Query::new()
                .eq("is_active", true)
                .order_by("sort_order", SortOrder::Ascending),
            Resource::Progress => Query::new()
                .order_by("created_at", SortOrder::Descending)
                .limit(10),
            Resource::Press => Query::new()
                .order_by("published_date", SortOrder::Descending)
                .limit(6),
            Resource::Guide => Query::new().order_by("step_number", SortOrder::Ascending),
            Resource::Locations => Query::new(),
            Resource::About => Query::new().limit(1),
            Resource::Cases | Resource::Interviews => {
                return Err(ServiceError::NotFound(format!("Section '{}'", resource)))
            }
        };
        Ok(self.store.select(resource.table(), &query).await?)
    }

    /// The single "about" record, if one was saved
    pub async fn about(&self) -> ServiceResult<Option<Record>> {
        Ok(self.section(Resource::About).await?.into_iter().next())
    }

    pub async fn home(&self) -> ServiceResult<HomeContent> {
        Ok(HomeContent {
            banners: self.section(Resource::Banners).await?,
            middle_banners: self.section(Resource::MiddleBanners).await?,
            cases: self.latest_cases(HOME_CASE_LIMIT).await?,
            progress: self.section(Resource::Progress).await?,
            about: self.about().await?,
            guide_steps: self.section(Resource::Guide).await?,
            press: self.section(Resource::Press).await?,
            locations: self.section(Resource::Locations).await?,
        })
    }

    /// Sitemap entries: static pages, every case, then active interviews
    pub async fn sitemap(&self, site_url: &str) -> ServiceResult<Vec<SitemapEntry>> {
        let base = site_url.trim_end_matches('/');
        let now = Utc::now().to_rfc3339();

        let static_pages = [
            ("", "daily", 1.0),
            ("/cases", "daily", 0.9),
            ("/quote", "monthly", 0.7),
        ];
        let mut entries: Vec<SitemapEntry> = static_pages
            .into_iter()
            .map(|(path, change_frequency, priority)| SitemapEntry {
                loc: format!("{}{}", base, path),
                last_modified: Some(now.clone()),
                change_frequency,
                priority,
            })
            .collect();

        let pages = [
            (
                Resource::Cases,
                Query::new().order_by("updated_at", SortOrder::Descending),
                0.8,
            ),
            (
                Resource::Interviews,
                Query::new()
                    .eq("is_active", true)
                    .order_by("updated_at", SortOrder::Descending),
                0.7,
            ),
        ];
        for (resource, query, priority) in pages {
            for record in self.store.select(resource.table(), &query).await? {
                let Some(slug) = record.get("slug").and_then(Value::as_str) else {
                    continue;
                };
                entries.push(SitemapEntry {
                    loc: format!("{}/{}/{}", base, resource.path(), slug),
                    last_modified: record
                        .get("updated_at")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    change_frequency: "weekly",
                    priority,
                });
            }
        }

        Ok(entries)
    }
}
