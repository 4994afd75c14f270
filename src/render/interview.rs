//! Interview body rendering
//!
//! Each entry becomes a `Q.` heading line followed by a divider, the answer
//! as Markdown body text, and the result card as Markdown inside a
//! highlighted panel. A body with no recognized structure is rendered as
//! plain Markdown.

use super::markdown::{html_escape, render_markdown};
use crate::models::QaEntry;
use crate::parser::interview;

/// Render a stored interview body to an HTML fragment
pub fn render_interview_body(content: &str) -> String {
    let entries = interview::parse(content);
    if entries.is_empty() {
        return render_plain(content);
    }
    render_entries(&entries)
}

/// Fallback rendering for documents without Q/A markers
pub fn render_plain(content: &str) -> String {
    format!(
        "<div class=\"interview-body prose\">\n{}</div>\n",
        render_markdown(content)
    )
}

/// Render parsed entries in source order
pub fn render_entries(entries: &[QaEntry]) -> String {
    let mut html = String::from("<div class=\"interview-body\">\n");
    for entry in entries {
        html.push_str(&render_entry(entry));
    }
    html.push_str("</div>\n");
    html
}

/// Render a single entry
pub fn render_entry(entry: &QaEntry) -> String {
    let mut html = String::from("<section class=\"qa-entry\">\n");

    html.push_str(&format!(
        "<div class=\"qa-question\">Q. {}</div>\n<hr class=\"qa-divider\" />\n",
        html_escape(entry.question_text().trim())
    ));

    if let Some(answer) = entry.answer_text() {
        html.push_str(&format!(
            "<div class=\"qa-answer prose\">\n{}</div>\n",
            render_markdown(answer.trim())
        ));
    }

    if let Some(card) = entry.result_card_text() {
        html.push_str(&format!(
            "<div class=\"qa-result-card prose\">\n{}</div>\n",
            render_markdown(card.trim())
        ));
    }

    html.push_str("</section>\n");
    html
}
