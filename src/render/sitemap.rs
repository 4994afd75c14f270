//! XML sitemap

use super::markdown::html_escape;
use crate::models::SitemapEntry;

/// Render entries as a sitemaps.org `urlset`
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", html_escape(&entry.loc)));
        if let Some(modified) = &entry.last_modified {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", html_escape(modified)));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n",
            entry.change_frequency, entry.priority
        ));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sitemap() {
        let entries = vec![
            SitemapEntry {
                loc: "https://example.com".to_string(),
                last_modified: None,
                change_frequency: "daily",
                priority: 1.0,
            },
            SitemapEntry {
                loc: "https://example.com/cases/a&b".to_string(),
                last_modified: Some("2024-05-01T00:00:00+00:00".to_string()),
                change_frequency: "weekly",
                priority: 0.8,
            },
        ];

        let xml = render_sitemap(&entries);
        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<loc>https://example.com/cases/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2024-05-01T00:00:00+00:00</lastmod>"));
    }
}
