//! Public site handlers

use super::admin::resource;
use super::request::client_key;
use super::AppState;
use crate::models::{QaEntry, QuoteRequest};
use crate::parser::interview;
use crate::render::{
    render_case_page, render_entries, render_interview_page, render_not_found_page, render_plain,
    render_sitemap,
};
use crate::services::ServiceError;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn serve_styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_str!("assets/site.css"),
    )
}

/// Interview detail page
pub async fn interview_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.content.interview_by_slug(&slug).await {
        Ok(interview) => Html(render_interview_page(&interview, &state.site)).into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Html(render_not_found_page("The interview")),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_interviews(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let interviews = state.content.list_interviews().await?;
    Ok(Json(interviews).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct CaseFilter {
    /// Category slug
    pub category: Option<String>,
}

pub async fn list_cases(
    State(state): State<AppState>,
    Query(filter): Query<CaseFilter>,
) -> Result<Response, ServiceError> {
    let cases = state.content.list_cases(filter.category.as_deref()).await?;
    Ok(Json(json!({ "cases": cases })).into_response())
}

/// Case detail page with related cases
pub async fn case_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let case = match state.content.case_by_slug(&slug).await {
        Ok(case) => case,
        Err(e) if e.is_not_found() => {
            return (StatusCode::NOT_FOUND, Html(render_not_found_page("The case"))).into_response()
        }
        Err(e) => return e.into_response(),
    };

    match state.content.related_cases(&case).await {
        Ok(related) => Html(render_case_page(&case, &related, &state.site)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Every home page section in one response
pub async fn home(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let home = state.content.home().await?;
    Ok(Json(home).into_response())
}

/// Banners, middle banners, progress, press, guide steps or locations
pub async fn list_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ServiceError> {
    let rows = state.content.section(resource(&name)?).await?;
    Ok(Json(json!({ "items": rows })).into_response())
}

pub async fn about(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let about = state.content.about().await?;
    Ok(Json(json!({ "about": about })).into_response())
}

pub async fn sitemap(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let entries = state.content.sitemap(&state.site.url).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&entries),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub entries: Vec<QaEntry>,
    /// True when no Q/A structure was found and the body renders as plain Markdown
    pub fallback: bool,
    pub html: String,
}

/// Parse and render an interview body without saving it
pub async fn preview_interview(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let entries = interview::parse(&request.content);
    let fallback = entries.is_empty();
    let html = if fallback {
        render_plain(&request.content)
    } else {
        render_entries(&entries)
    };

    Json(PreviewResponse {
        entries,
        fallback,
        html,
    })
}

/// Quote request submission
pub async fn submit_quote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<QuoteRequest>,
) -> Result<Response, ServiceError> {
    let client = client_key(&headers);
    let receipt = state.quotes.submit(&client, request).await?;

    Ok(Json(json!({
        "success": true,
        "id": receipt.id,
        "file_url": receipt.file_url,
    }))
    .into_response())
}
