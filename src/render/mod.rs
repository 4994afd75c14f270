//! HTML rendering for public pages
//!
//! - `markdown` - Markdown to sanitized HTML fragments
//! - `interview` - Q/A entry layout with plain Markdown fallback
//! - `page` - full documents with page metadata
//! - `sitemap` - XML sitemap

pub mod interview;
pub mod markdown;
pub mod page;
pub mod sitemap;

pub use interview::{render_entries, render_entry, render_interview_body, render_plain};
pub use markdown::{html_escape, is_safe_url, render_markdown};
pub use page::{
    render_case_page, render_interview_page, render_not_found_page, wrap_in_document, PageMeta,
};
pub use sitemap::render_sitemap;
