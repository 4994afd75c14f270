//! Site content records
//!
//! Each admin-editable resource has an input shape that is validated before
//! it reaches the record store. Stored rows carry extra bookkeeping fields
//! (`id`, `created_at`, `updated_at`) which these types ignore on read.
//! Absent optional fields serialize as `null`, so a validated input written
//! as an update patch clears them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn default_true() -> bool {
    true
}

/// Admin-editable resources and the tables that back them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Banners,
    MiddleBanners,
    Cases,
    Interviews,
    Press,
    Progress,
    Locations,
    Guide,
    About,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Banners,
        Resource::MiddleBanners,
        Resource::Cases,
        Resource::Interviews,
        Resource::Press,
        Resource::Progress,
        Resource::Locations,
        Resource::Guide,
        Resource::About,
    ];

    /// Record store table name
    pub fn table(&self) -> &'static str {
        match self {
            Resource::Banners => "banners",
            Resource::MiddleBanners => "middle_banners",
            Resource::Cases => "cases",
            Resource::Interviews => "interviews",
            Resource::Press => "press",
            Resource::Progress => "progress",
            Resource::Locations => "factory_locations",
            Resource::Guide => "guide_steps",
            Resource::About => "about",
        }
    }

    /// URL path segment used by the admin API
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Banners => "banners",
            Resource::MiddleBanners => "middle-banners",
            Resource::Cases => "cases",
            Resource::Interviews => "interviews",
            Resource::Press => "press",
            Resource::Progress => "progress",
            Resource::Locations => "locations",
            Resource::Guide => "guide",
            Resource::About => "about",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .iter()
            .copied()
            .find(|r| r.path() == s)
            .ok_or_else(|| format!("Unknown resource: {}", s))
    }
}

/// Top or middle banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerInput {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i64,
}

/// Success case shown on the case grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub thumbnail_image_1: String,
    #[serde(default)]
    pub thumbnail_image_2: Option<String>,
    #[serde(default)]
    pub detail_image: Option<String>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Row of the `case_categories` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Category fields joined onto case listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

impl From<&CaseCategory> for CategoryRef {
    fn from(category: &CaseCategory) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

/// Listing projection returned by the public case API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub thumbnail_image_1: Option<String>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

/// Stored case with its joined category, shown on the case detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub thumbnail_image_1: Option<String>,
    #[serde(default)]
    pub thumbnail_image_2: Option<String>,
    #[serde(default)]
    pub detail_image: Option<String>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

/// One `<url>` of the sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: Option<String>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Partner interview; `content_markdown` holds the Q/A body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    pub closing_text: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_active: bool,
}

/// Production stage of a progress tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStage {
    #[serde(rename = "상담")]
    Consultation,
    #[serde(rename = "샘플")]
    Sample,
    #[serde(rename = "발주")]
    Order,
    #[serde(rename = "생산")]
    Production,
    #[serde(rename = "배송")]
    Delivery,
}

/// Live production progress tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub moq: Option<String>,
    #[serde(default)]
    pub progress_percent: i64,
    pub stage: ProgressStage,
    #[serde(default)]
    pub stage_date: Option<String>,
}

/// Press coverage item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
}

/// "About" section text with up to four strengths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutInput {
    #[serde(default)]
    pub section_title: String,
    #[serde(default)]
    pub section_description: Option<String>,
    #[serde(default)]
    pub strength_1_title: Option<String>,
    #[serde(default)]
    pub strength_1_description: Option<String>,
    #[serde(default)]
    pub strength_1_image_url: Option<String>,
    #[serde(default)]
    pub strength_2_title: Option<String>,
    #[serde(default)]
    pub strength_2_description: Option<String>,
    #[serde(default)]
    pub strength_2_image_url: Option<String>,
    #[serde(default)]
    pub strength_3_title: Option<String>,
    #[serde(default)]
    pub strength_3_description: Option<String>,
    #[serde(default)]
    pub strength_3_image_url: Option<String>,
    #[serde(default)]
    pub strength_4_title: Option<String>,
    #[serde(default)]
    pub strength_4_description: Option<String>,
    #[serde(default)]
    pub strength_4_image_url: Option<String>,
}

/// One step of the six-step ordering guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideStepInput {
    #[serde(default = "default_step_number")]
    pub step_number: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_step_number() -> i64 {
    1
}

/// Partner factory pin on the map section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    #[serde(default)]
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

/// File attached to a quote request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteAttachment {
    pub file_name: String,
    /// Base64-encoded file contents
    pub data: String,
}

/// Public quote request form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub example_product_link: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub privacy_agreed: bool,
    /// Hidden form field; anything typed here marks the submission as spam
    #[serde(default)]
    pub honeypot: Option<String>,
    #[serde(default)]
    pub attachment: Option<QuoteAttachment>,
}

/// Row written to the `quotes` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub name: String,
    pub contact: String,
    pub category: Option<String>,
    pub example_product_link: Option<String>,
    pub requirements: Option<String>,
    pub file_url: Option<String>,
    pub ip_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_round_trips_through_path() {
        for resource in Resource::ALL {
            assert_eq!(resource.path().parse::<Resource>().unwrap(), resource);
        }
        assert!("users".parse::<Resource>().is_err());
    }

    #[test]
    fn test_resource_tables() {
        assert_eq!(Resource::Locations.table(), "factory_locations");
        assert_eq!(Resource::Guide.table(), "guide_steps");
        assert_eq!(Resource::MiddleBanners.table(), "middle_banners");
    }

    #[test]
    fn test_banner_defaults() {
        let banner: BannerInput =
            serde_json::from_str(r#"{"image_url": "https://cdn.example.com/b.png"}"#).unwrap();
        assert!(banner.is_active);
        assert_eq!(banner.sort_order, 0);
    }

    #[test]
    fn test_absent_optionals_serialize_as_null() {
        let press: PressInput = serde_json::from_str(r#"{"title": "Featured"}"#).unwrap();
        let value = serde_json::to_value(&press).unwrap();
        assert!(value["external_link"].is_null());
        assert!(value.as_object().unwrap().contains_key("external_link"));
    }

    #[test]
    fn test_progress_stage_uses_korean_labels() {
        let stage: ProgressStage = serde_json::from_str("\"생산\"").unwrap();
        assert_eq!(stage, ProgressStage::Production);
        assert!(serde_json::from_str::<ProgressStage>("\"shipping\"").is_err());
    }

    #[test]
    fn test_interview_ignores_bookkeeping_fields() {
        let json = serde_json::json!({
            "id": "abc",
            "title": "T",
            "slug": "t",
            "created_at": "2024-01-01T00:00:00Z",
            "is_active": true
        });
        let interview: Interview = serde_json::from_value(json).unwrap();
        assert_eq!(interview.id.as_deref(), Some("abc"));
        assert!(interview.closing_text.is_none());
    }
}
