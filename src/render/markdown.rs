//! Markdown to HTML rendering
//!
//! Content is authored by admins, but it is still treated as untrusted:
//! - GFM tables and strikethrough are enabled
//! - Soft line breaks render as `<br />`, so single newlines survive
//! - Raw HTML is escaped instead of passed through
//! - Link and image URLs with unsafe schemes are neutralized

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Replacement for URLs that fail [`is_safe_url`]
const BLOCKED_URL: &str = "#";

/// Render Markdown content to an HTML fragment
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed(BLOCKED_URL)
    }
}

/// Allow http(s), mailto, tel, anchors and relative paths
pub fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with('#')
        || (!lower.contains(':') && !lower.is_empty())
}

/// Escape HTML special characters
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_break_becomes_line_break() {
        let html = render_markdown("line one\nline two");
        assert!(html.contains("line one<br />"));
        assert!(html.contains("line two"));
    }

    #[test]
    fn test_tables_are_rendered() {
        let html = render_markdown("| Item | Value |\n|---|---|\n| MOQ | 500 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>MOQ</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_javascript_links_are_blocked() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_safe_links_are_kept() {
        let html = render_markdown("[site](https://example.com/a)");
        assert!(html.contains(r#"href="https://example.com/a""#));
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("/cases/kitchen"));
        assert!(is_safe_url("#top"));
        assert!(!is_safe_url("javascript:void(0)"));
        assert!(!is_safe_url("data:text/html,hi"));
        assert!(!is_safe_url(""));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
