//! Admin resource validators
//!
//! Each validator normalizes blank optional fields to null, checks the
//! resource's field rules, and returns the cleaned input.

use super::rules::{
    blank_to_none, in_range, is_uuid, optional_url, require, require_url, ValidationErrors,
};
use crate::models::{
    AboutInput, BannerInput, CaseInput, GuideStepInput, Interview, LocationInput, PressInput,
    ProgressInput, Resource,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub fn validate_banner(mut input: BannerInput) -> Result<BannerInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.link_url);

    require_url(&mut errors, "image_url", &input.image_url, "Upload an image");
    optional_url(&mut errors, "link_url", input.link_url.as_deref());

    errors.into_result(input)
}

pub fn validate_case(mut input: CaseInput) -> Result<CaseInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.summary);
    blank_to_none(&mut input.content_markdown);
    blank_to_none(&mut input.category_id);
    blank_to_none(&mut input.thumbnail_image_2);
    blank_to_none(&mut input.detail_image);
    if let Some(tags) = input.hashtags.as_mut() {
        tags.retain(|t| !t.trim().is_empty());
    }

    require(&mut errors, "title", &input.title, "Title is required");
    require(&mut errors, "slug", &input.slug, "Slug is required");
    if let Some(category) = input.category_id.as_deref() {
        if !is_uuid(category) {
            errors.push("category_id", "Must be a valid UUID");
        }
    }
    require_url(
        &mut errors,
        "thumbnail_image_1",
        &input.thumbnail_image_1,
        "Upload thumbnail image 1",
    );
    optional_url(&mut errors, "thumbnail_image_2", input.thumbnail_image_2.as_deref());
    optional_url(&mut errors, "detail_image", input.detail_image.as_deref());

    errors.into_result(input)
}

pub fn validate_interview(mut input: Interview) -> Result<Interview, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.image_url);
    blank_to_none(&mut input.summary);
    blank_to_none(&mut input.content_markdown);
    blank_to_none(&mut input.closing_text);
    input.id = None;

    require(&mut errors, "title", &input.title, "Title is required");
    require(&mut errors, "slug", &input.slug, "Slug is required");
    optional_url(&mut errors, "image_url", input.image_url.as_deref());

    errors.into_result(input)
}

pub fn validate_progress(mut input: ProgressInput) -> Result<ProgressInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.image_url);
    blank_to_none(&mut input.moq);
    blank_to_none(&mut input.stage_date);

    require(&mut errors, "title", &input.title, "Title is required");
    optional_url(&mut errors, "image_url", input.image_url.as_deref());
    in_range(&mut errors, "progress_percent", input.progress_percent, 0, 100);

    errors.into_result(input)
}

pub fn validate_press(mut input: PressInput) -> Result<PressInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.thumbnail_url);
    blank_to_none(&mut input.published_date);
    blank_to_none(&mut input.summary);
    blank_to_none(&mut input.external_link);

    require(&mut errors, "title", &input.title, "Title is required");
    optional_url(&mut errors, "thumbnail_url", input.thumbnail_url.as_deref());
    optional_url(&mut errors, "external_link", input.external_link.as_deref());

    errors.into_result(input)
}

pub fn validate_about(mut input: AboutInput) -> Result<AboutInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for field in [
        &mut input.section_description,
        &mut input.strength_1_title,
        &mut input.strength_1_description,
        &mut input.strength_1_image_url,
        &mut input.strength_2_title,
        &mut input.strength_2_description,
        &mut input.strength_2_image_url,
        &mut input.strength_3_title,
        &mut input.strength_3_description,
        &mut input.strength_3_image_url,
        &mut input.strength_4_title,
        &mut input.strength_4_description,
        &mut input.strength_4_image_url,
    ] {
        blank_to_none(field);
    }

    require(
        &mut errors,
        "section_title",
        &input.section_title,
        "Section title is required",
    );

    errors.into_result(input)
}

pub fn validate_guide_step(mut input: GuideStepInput) -> Result<GuideStepInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.description);

    in_range(&mut errors, "step_number", input.step_number, 1, 6);
    require(&mut errors, "title", &input.title, "Title is required");

    errors.into_result(input)
}

pub fn validate_location(mut input: LocationInput) -> Result<LocationInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut input.address);

    require(&mut errors, "title", &input.title, "Title is required");
    in_range(&mut errors, "latitude", input.latitude, -90.0, 90.0);
    in_range(&mut errors, "longitude", input.longitude, -180.0, 180.0);

    errors.into_result(input)
}

fn run<T, F>(body: Value, validate: F) -> Result<Value, ValidationErrors>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce(T) -> Result<T, ValidationErrors>,
{
    let input: T = serde_json::from_value(body)
        .map_err(|e| ValidationErrors::single("body", e.to_string()))?;
    let cleaned = validate(input)?;
    serde_json::to_value(cleaned).map_err(|e| ValidationErrors::single("body", e.to_string()))
}

/// Validate a JSON body for the given resource and return the cleaned record
pub fn validate_resource(resource: Resource, body: Value) -> Result<Value, ValidationErrors> {
    match resource {
        Resource::Banners | Resource::MiddleBanners => run(body, validate_banner),
        Resource::Cases => run(body, validate_case),
        Resource::Interviews => run(body, validate_interview),
        Resource::Press => run(body, validate_press),
        Resource::Progress => run(body, validate_progress),
        Resource::Locations => run(body, validate_location),
        Resource::Guide => run(body, validate_guide_step),
        Resource::About => run(body, validate_about),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_banner_requires_image_url() {
        let err = validate_resource(Resource::Banners, json!({ "image_url": "" })).unwrap_err();
        assert!(err.has_field("image_url"));
    }

    #[test]
    fn test_banner_blank_link_is_dropped() {
        let value = validate_resource(
            Resource::MiddleBanners,
            json!({ "image_url": "https://cdn.example.com/b.png", "link_url": "" }),
        )
        .unwrap();
        assert!(value["link_url"].is_null());
        assert_eq!(value["is_active"], true);
    }

    #[test]
    fn test_case_rules() {
        let err = validate_resource(
            Resource::Cases,
            json!({ "title": "", "slug": "s", "thumbnail_image_1": "nope", "category_id": "x" }),
        )
        .unwrap_err();
        assert!(err.has_field("title"));
        assert!(err.has_field("thumbnail_image_1"));
        assert!(err.has_field("category_id"));
        assert!(!err.has_field("slug"));
    }

    #[test]
    fn test_interview_normalizes_blank_fields() {
        let value = validate_resource(
            Resource::Interviews,
            json!({
                "id": "client-supplied",
                "title": "Partner story",
                "slug": "partner-story",
                "summary": "",
                "closing_text": "",
                "content_markdown": "Q: Hi?\nA: Hello."
            }),
        )
        .unwrap();
        assert!(value.get("id").is_none());
        assert!(value["summary"].is_null());
        assert!(value["closing_text"].is_null());
        assert_eq!(value["sort_order"], 0);
    }

    #[test]
    fn test_progress_rules() {
        let err = validate_resource(
            Resource::Progress,
            json!({ "title": "Tumbler", "progress_percent": 120, "stage": "샘플" }),
        )
        .unwrap_err();
        assert!(err.has_field("progress_percent"));

        let err = validate_resource(Resource::Progress, json!({ "title": "T", "stage": "done" }))
            .unwrap_err();
        assert!(err.has_field("body"));
    }

    #[test]
    fn test_press_optional_links() {
        let err = validate_resource(
            Resource::Press,
            json!({ "title": "Featured", "external_link": "news" }),
        )
        .unwrap_err();
        assert!(err.has_field("external_link"));

        assert!(validate_resource(
            Resource::Press,
            json!({ "title": "Featured", "external_link": "" })
        )
        .is_ok());
    }

    #[test]
    fn test_guide_step_range() {
        let err = validate_resource(Resource::Guide, json!({ "step_number": 7, "title": "Ship" }))
            .unwrap_err();
        assert!(err.has_field("step_number"));
        assert!(validate_resource(Resource::Guide, json!({ "title": "Consult" })).is_ok());
    }

    #[test]
    fn test_location_bounds() {
        let err = validate_resource(
            Resource::Locations,
            json!({ "title": "Factory", "latitude": 91.0, "longitude": 200.0 }),
        )
        .unwrap_err();
        assert!(err.has_field("latitude"));
        assert!(err.has_field("longitude"));
    }

    #[test]
    fn test_about_requires_section_title() {
        let err = validate_resource(Resource::About, json!({ "section_title": " " })).unwrap_err();
        assert!(err.has_field("section_title"));
    }
}
