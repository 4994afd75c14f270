//! Full-page HTML documents

use super::interview::render_interview_body;
use super::markdown::{html_escape, render_markdown};
use crate::models::{CaseDetail, CaseSummary, Interview, SiteSection};

/// Page-level metadata written into `<head>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
}

impl PageMeta {
    /// Metadata for an interview page; description falls back to the title
    pub fn for_interview(interview: &Interview, site: &SiteSection) -> Self {
        let description = interview
            .summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&interview.title)
            .to_string();

        Self {
            title: format!("{} | {}", interview.title, site.name),
            description,
            url: format!(
                "{}/interviews/{}",
                site.url.trim_end_matches('/'),
                interview.slug
            ),
            image: interview.image_url.clone(),
        }
    }

    /// Metadata for a case detail page
    pub fn for_case(case: &CaseDetail, site: &SiteSection) -> Self {
        let description = case
            .summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&case.title)
            .to_string();

        Self {
            title: format!("{} - {}", case.title, site.name),
            description,
            url: format!("{}/cases/{}", site.url.trim_end_matches('/'), case.slug),
            image: case.thumbnail_image_1.clone(),
        }
    }
}

fn push_image(body: &mut String, class: &str, src: &str, alt: &str) {
    body.push_str(&format!(
        "<img class=\"{}\" src=\"{}\" alt=\"{}\" />\n",
        class,
        html_escape(src),
        html_escape(alt)
    ));
}

/// Render a case detail page with its related cases
pub fn render_case_page(case: &CaseDetail, related: &[CaseSummary], site: &SiteSection) -> String {
    let meta = PageMeta::for_case(case, site);

    let mut body = String::from("<article class=\"case-detail\">\n");
    if let Some(image) = &case.thumbnail_image_1 {
        push_image(&mut body, "case-hero", image, &case.title);
    }
    if let Some(category) = &case.category {
        body.push_str(&format!(
            "<span class=\"case-category\">{}</span>\n",
            html_escape(&category.name)
        ));
    }
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(&case.title)));
    if let Some(summary) = &case.summary {
        body.push_str(&format!(
            "<p class=\"case-summary\">{}</p>\n",
            html_escape(summary)
        ));
    }
    if let Some(tags) = case.hashtags.as_ref().filter(|t| !t.is_empty()) {
        body.push_str("<div class=\"case-hashtags\">");
        for tag in tags {
            body.push_str(&format!("<span>#{}</span>", html_escape(tag)));
        }
        body.push_str("</div>\n");
    }
    if let Some(image) = &case.detail_image {
        push_image(&mut body, "case-image", image, &case.title);
    }
    if let Some(content) = &case.content_markdown {
        body.push_str(&format!(
            "<div class=\"prose\">\n{}</div>\n",
            render_markdown(content)
        ));
    }
    if let Some(image) = &case.thumbnail_image_2 {
        push_image(&mut body, "case-image", image, &case.title);
    }
    body.push_str("</article>\n");

    if !related.is_empty() {
        body.push_str("<section class=\"case-related\">\n<h2>관련 성공사례</h2>\n<ul>\n");
        for item in related {
            body.push_str(&format!(
                "<li><a href=\"/cases/{}\">{}</a></li>\n",
                html_escape(&item.slug),
                html_escape(&item.title)
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    wrap_in_document(&body, &meta)
}

/// Render a complete interview page
pub fn render_interview_page(interview: &Interview, site: &SiteSection) -> String {
    let meta = PageMeta::for_interview(interview, site);

    let mut body = String::new();
    if let Some(image) = &interview.image_url {
        body.push_str(&format!(
            "<img class=\"interview-hero\" src=\"{}\" alt=\"{}\" />\n",
            html_escape(image),
            html_escape(&interview.title)
        ));
    }
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(&interview.title)));
    if let Some(summary) = &interview.summary {
        body.push_str(&format!(
            "<p class=\"interview-summary\">{}</p>\n",
            html_escape(summary)
        ));
    }
    if let Some(content) = &interview.content_markdown {
        body.push_str(&render_interview_body(content));
    }
    if let Some(closing) = &interview.closing_text {
        body.push_str(&format!(
            "<div class=\"interview-closing prose\">\n{}</div>\n",
            render_markdown(closing)
        ));
    }

    wrap_in_document(&body, &meta)
}

/// Render a "not found" page body
pub fn render_not_found_page(what: &str) -> String {
    let meta = PageMeta {
        title: "Not found".to_string(),
        description: String::new(),
        url: String::new(),
        image: None,
    };
    let body = format!(
        "<div class=\"not-found\">\n    <h1>Not found</h1>\n    <p>{} could not be found.</p>\n</div>\n",
        html_escape(what)
    );
    wrap_in_document(&body, &meta)
}

/// Wrap content in a full HTML document
pub fn wrap_in_document(content: &str, meta: &PageMeta) -> String {
    let mut head = format!(
        "    <meta charset=\"utf-8\">\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n    <title>{}</title>\n",
        html_escape(&meta.title)
    );
    if !meta.description.is_empty() {
        head.push_str(&format!(
            "    <meta name=\"description\" content=\"{0}\">\n    <meta property=\"og:description\" content=\"{0}\">\n",
            html_escape(&meta.description)
        ));
    }
    head.push_str(&format!(
        "    <meta property=\"og:title\" content=\"{}\">\n",
        html_escape(&meta.title)
    ));
    if !meta.url.is_empty() {
        head.push_str(&format!(
            "    <meta property=\"og:url\" content=\"{}\">\n",
            html_escape(&meta.url)
        ));
    }
    if let Some(image) = &meta.image {
        head.push_str(&format!(
            "    <meta property=\"og:image\" content=\"{}\">\n",
            html_escape(image)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
{}    <link rel="stylesheet" href="/static/site.css">
</head>
<body>
    <main class="container">
{}    </main>
</body>
</html>"#,
        head, content
    )
}
